use super::error::{AdbError, AdbResult};
use super::runner::{CommandRunner, SystemRunner, locate_adb};
use super::types::{CommandOutput, Device};
use std::path::{Path, PathBuf};

/// Thin wrapper over the `adb` command-line tool.
///
/// Every method maps to exactly one adb invocation; anything composed of
/// several calls (backups, batch uninstall) lives in `crate::packages`.
#[derive(Debug, Clone)]
pub struct AdbShell<R = SystemRunner> {
    adb: PathBuf,
    runner: R,
}

impl AdbShell<SystemRunner> {
    /// Shell backed by real processes, using `explicit` as the adb path when given.
    pub fn locate(explicit: Option<&Path>) -> Self {
        Self::with_runner(locate_adb(explicit), SystemRunner)
    }
}

impl<R: CommandRunner> AdbShell<R> {
    pub fn with_runner(adb: PathBuf, runner: R) -> Self {
        Self { adb, runner }
    }

    pub fn adb_path(&self) -> &Path {
        &self.adb
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn exec<S: AsRef<str>>(&self, args: &[S]) -> AdbResult<CommandOutput> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let command = format!("adb {}", args.join(" "));
        log::debug!("Running {command}");
        match self.runner.run(&self.adb, &args).await {
            Ok(output) => {
                log::debug!("ADB result: {}", output.stdout.trim_end());
                Ok(output)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AdbError::NotFound {
                path: self.adb.clone(),
            }),
            Err(source) => Err(AdbError::Spawn { command, source }),
        }
    }

    async fn exec_checked<S: AsRef<str>>(&self, args: &[S]) -> AdbResult<CommandOutput> {
        let output = self.exec(args).await?;
        if !output.success {
            let command = args
                .iter()
                .map(|a| a.as_ref())
                .collect::<Vec<_>>()
                .join(" ");
            return Err(AdbError::CommandFailed {
                command: format!("adb {command}"),
                stderr: output.failure_text(),
            });
        }
        Ok(output)
    }

    /// Runs `adb version` so a missing install is reported before the first real action.
    pub async fn ensure_available(&self) -> AdbResult<()> {
        self.exec_checked(&["version"]).await.map(|_| ())
    }

    pub async fn list_devices(&self) -> AdbResult<Vec<Device>> {
        let output = self.exec_checked(&["devices"]).await?;
        Ok(parse_devices(&output.stdout))
    }

    /// Package identifiers in the order the device reports them.
    ///
    /// The exit code is not checked: with no device attached adb prints to
    /// stderr and the empty list is reported as a warning by the caller.
    pub async fn list_packages(&self) -> AdbResult<Vec<String>> {
        let output = self.exec(&["shell", "pm", "list", "packages"]).await?;
        if !output.success {
            log::warn!("pm list packages: {}", output.failure_text());
        }
        Ok(parse_packages(&output.stdout))
    }

    /// Uninstalls for user 0 and returns the raw `pm` output for classification.
    pub async fn uninstall(&self, package: &str) -> AdbResult<String> {
        let package = package.trim();
        if package.is_empty() {
            return Err(AdbError::EmptyPackageName);
        }
        let output = self
            .exec(&["shell", "pm", "uninstall", "--user", "0", package])
            .await?;
        Ok(output.stdout)
    }

    pub async fn reboot(&self) -> AdbResult<()> {
        self.exec_checked(&["reboot"]).await.map(|_| ())
    }

    /// Remote paths of every APK (base and splits) that make up `package`.
    pub async fn apk_paths(&self, package: &str) -> AdbResult<Vec<String>> {
        let output = self.exec_checked(&["shell", "pm", "path", package]).await?;
        let paths: Vec<String> = parse_packages(&output.stdout)
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();
        if paths.is_empty() {
            return Err(AdbError::NoApkPaths {
                package: package.to_string(),
            });
        }
        Ok(paths)
    }

    pub async fn pull(&self, remote: &str, dest_dir: &Path) -> AdbResult<()> {
        let dest = dest_dir.to_string_lossy();
        self.exec_checked(&["pull", remote, &*dest])
            .await
            .map(|_| ())
    }

    /// Installs one APK or a split set for user 0, replacing any existing install.
    pub async fn install(&self, apks: &[PathBuf]) -> AdbResult<String> {
        let output = self.exec(install_args(apks).as_slice()).await?;
        let text = format!("{}{}", output.stdout, output.stderr);
        if !output.success || !text.to_lowercase().contains("success") {
            return Err(AdbError::InstallFailed {
                output: text.trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

/// Parses `adb devices`: header line first, then `<serial>\t<status>` rows.
pub fn parse_devices(output: &str) -> Vec<Device> {
    output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let (serial, status) = line.split_once('\t')?;
            Some(Device::new(serial.trim(), status.trim()))
        })
        .collect()
}

/// Text after the first colon of each `key:value` line; lines without a colon are dropped.
pub fn parse_packages(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .collect()
}

pub fn install_args(apks: &[PathBuf]) -> Vec<String> {
    let verb = if apks.len() > 1 {
        "install-multiple"
    } else {
        "install"
    };
    let mut args: Vec<String> = [verb, "-r", "--user", "0"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    args.extend(apks.iter().map(|p| p.to_string_lossy().into_owned()));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_devices_basic() {
        let adb_output = "List of devices attached\nabc123\tdevice\n";
        let devs = parse_devices(adb_output);
        assert_eq!(devs, vec![Device::new("abc123", "device")]);
    }

    #[test]
    fn test_parse_devices_multiple() {
        let adb_output = "List of devices attached\n1d36d8f1\tdevice\n192.168.1.20:5555\tunauthorized\n\n";
        let devices = parse_devices(adb_output);
        assert_eq!(
            devices,
            vec![
                Device::new("1d36d8f1", "device"),
                Device::new("192.168.1.20:5555", "unauthorized"),
            ]
        );
    }

    #[test]
    fn test_parse_devices_header_only() {
        assert!(parse_devices("List of devices attached\n\n").is_empty());
        assert!(parse_devices("").is_empty());
    }

    #[test]
    fn test_parse_devices_windows_line_endings() {
        let devices = parse_devices("List of devices attached\r\nR58M\tdevice\r\n\r\n");
        assert_eq!(devices, vec![Device::new("R58M", "device")]);
    }

    #[test]
    fn test_parse_devices_skips_rows_without_tab() {
        let devices = parse_devices("List of devices attached\ngarbage line\nabc\toffline\n");
        assert_eq!(devices, vec![Device::new("abc", "offline")]);
    }

    #[test]
    fn test_parse_packages_skips_malformed() {
        let output = "package:com.a\npackage:com.b\nmalformed\n";
        assert_eq!(parse_packages(output), vec!["com.a", "com.b"]);
    }

    #[test]
    fn test_parse_packages_keeps_duplicates_and_order() {
        let output = "package:com.z\npackage:com.a\npackage:com.z\n";
        assert_eq!(parse_packages(output), vec!["com.z", "com.a", "com.z"]);
    }

    #[test]
    fn test_parse_packages_splits_on_first_colon_only() {
        let output = "package:/data/app/~~x==/com.a-1/base.apk\n";
        assert_eq!(
            parse_packages(output),
            vec!["/data/app/~~x==/com.a-1/base.apk"]
        );
    }

    #[test]
    fn test_install_args_single_vs_multiple() {
        let one = install_args(&[PathBuf::from("base.apk")]);
        assert_eq!(one, vec!["install", "-r", "--user", "0", "base.apk"]);

        let split = install_args(&[PathBuf::from("base.apk"), PathBuf::from("split_config.en.apk")]);
        assert_eq!(split[0], "install-multiple");
        assert_eq!(&split[4..], ["base.apk", "split_config.en.apk"]);
    }
}
