// Logging set-up: one append-only file in the home directory
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

pub const LOG_FILE_NAME: &str = "adb_debloater.log";
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to determine home directory for the log file")]
    HomeDirectoryNotFound,

    #[error("Failed to open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where and how verbosely to log. Built once in `main`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `None` means `~/adb_debloater.log`.
    pub path: Option<PathBuf>,
    pub level: LevelFilter,
}

impl LogConfig {
    pub fn new(debug: bool) -> Self {
        Self {
            path: None,
            level: if debug {
                LevelFilter::Trace
            } else {
                LevelFilter::Debug
            },
        }
    }

    pub fn resolve_path(&self) -> Result<PathBuf, LogError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        homedir::my_home()
            .ok()
            .flatten()
            .map(|home| home.join(LOG_FILE_NAME))
            .ok_or(LogError::HomeDirectoryNotFound)
    }
}

/// Flushes the logger when the application shuts down.
pub struct LogGuard {
    path: Option<PathBuf>,
}

impl LogGuard {
    /// Log file in use, `None` when logging fell back to stderr.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        log::logger().flush();
    }
}

/// Builds an env_logger that appends `<timestamp> <LEVEL> <message>` lines to the
/// configured file. `RUST_LOG` overrides the configured level.
pub fn build_logger(config: &LogConfig) -> Result<(env_logger::Logger, PathBuf), LogError> {
    let path = config.resolve_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LogError::Open {
            path: path.clone(),
            source,
        })?;

    let mut builder = base_builder(config.level);
    builder.target(Target::Pipe(Box::new(file)));
    Ok((builder.build(), path))
}

fn base_builder(level: LevelFilter) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format(LOG_TIME_FORMAT),
                record.level(),
                record.args()
            )
        });
    builder
}

/// Installs the process logger. Falls back to stderr if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> LogGuard {
    let (logger, path) = match build_logger(config) {
        Ok((logger, path)) => (logger, Some(path)),
        Err(e) => {
            eprintln!("⚠️ {e}; logging to stderr instead");
            let mut builder = base_builder(config.level);
            builder.target(Target::Stderr);
            (builder.build(), None)
        }
    };

    let max_level = logger.filter();
    match log::set_boxed_logger(Box::new(logger)) {
        Ok(()) => log::set_max_level(max_level),
        Err(e) => eprintln!("⚠️ Logger already installed: {e}"),
    }
    LogGuard { path }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Record};

    #[test]
    fn default_level_is_debug_and_debug_flag_is_trace() {
        assert_eq!(LogConfig::new(false).level, LevelFilter::Debug);
        assert_eq!(LogConfig::new(true).level, LevelFilter::Trace);
    }

    #[test]
    fn explicit_path_is_used_as_is() {
        let config = LogConfig {
            path: Some(PathBuf::from("/tmp/custom.log")),
            level: LevelFilter::Info,
        };
        assert_eq!(config.resolve_path().unwrap(), PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn lines_are_appended_with_level() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(LOG_FILE_NAME);
        std::fs::write(&path, "earlier line\n").unwrap();
        let config = LogConfig {
            path: Some(path.clone()),
            level: LevelFilter::Debug,
        };

        let (logger, used) = build_logger(&config).unwrap();
        logger.log(
            &Record::builder()
                .args(format_args!("com.a uninstalled successfully."))
                .level(Level::Info)
                .target("android_debloater")
                .build(),
        );
        logger.flush();

        assert_eq!(used, path);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier line\n"));

        let line = contents.lines().nth(1).unwrap();
        let (stamp, rest) = line.split_at(19);
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, LOG_TIME_FORMAT).is_ok());
        assert_eq!(rest, " INFO com.a uninstalled successfully.");
    }

    #[test]
    fn unopenable_path_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LogConfig {
            path: Some(tmp.path().join("no-such-dir").join("x.log")),
            level: LevelFilter::Debug,
        };
        assert!(matches!(build_logger(&config), Err(LogError::Open { .. })));
    }
}
