use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for adb operations.
pub type AdbResult<T> = Result<T, AdbError>;

/// The error type for everything that goes through the `adb` binary.
#[derive(Debug, Error)]
pub enum AdbError {
    #[error(
        "'adb' not found at {path:?}. Install Android Platform Tools (https://developer.android.com/tools/adb) or add 'adb' to PATH."
    )]
    NotFound { path: PathBuf },

    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("'{command}' failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Package name cannot be empty")]
    EmptyPackageName,

    #[error("No APK paths found for {package}")]
    NoApkPaths { package: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("Backup path is not a directory: {path:?}")]
    InvalidBackupDir { path: PathBuf },

    #[error("No .apk files found in {path:?}")]
    NoApkFiles { path: PathBuf },

    #[error("Install failed: {output}")]
    InstallFailed { output: String },
}

impl AdbError {
    /// True when the adb binary itself could not be located or started.
    pub fn is_adb_missing(&self) -> bool {
        match self {
            AdbError::NotFound { .. } => true,
            AdbError::Spawn { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        AdbError::Io {
            context: context.into(),
            source,
        }
    }
}
