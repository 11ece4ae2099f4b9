// Process plumbing for the external adb binary
use super::types::CommandOutput;
use std::path::{Path, PathBuf};
use std::process::Stdio;

#[cfg(windows)]
pub const ADB_FILENAME: &str = "adb.exe";
#[cfg(not(windows))]
pub const ADB_FILENAME: &str = "adb";

/// Runs a program to completion and captures its output.
///
/// `AdbShell` talks to the device only through this trait so tests can replay
/// canned adb output without a phone attached.
#[allow(async_fn_in_trait)]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<CommandOutput>;
}

/// Spawns real processes with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[String]) -> std::io::Result<CommandOutput> {
        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        hide_console_window(&mut cmd);
        let output = cmd.output().await?;
        Ok(CommandOutput::from_process(output))
    }
}

// Keep adb from flashing a console window on Windows
#[cfg(windows)]
fn hide_console_window(cmd: &mut tokio::process::Command) {
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut tokio::process::Command) {}

/// Places a bundled platform-tools folder may live, relative to the executable directory.
pub fn bundled_candidates(exe_dir: &Path) -> Vec<PathBuf> {
    [
        exe_dir.join("platform-tools"),
        exe_dir.join("resources").join("platform-tools"),
        // some installers unpack resources under "_up_"
        exe_dir.join("_up_").join("platform-tools"),
    ]
    .into_iter()
    .map(|dir| dir.join(ADB_FILENAME))
    .collect()
}

/// Picks the adb executable: explicit path, then a bundled copy next to the
/// running binary, then whatever `adb` resolves to on `PATH`.
pub fn locate_adb(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    if let Some(dir) = exe_dir
        && let Some(found) = bundled_candidates(&dir).into_iter().find(|p| p.is_file())
    {
        log::debug!("Using bundled adb at {}", found.display());
        return found;
    }

    PathBuf::from(ADB_FILENAME)
}
