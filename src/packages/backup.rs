// APK backups taken before uninstalling, and restoring them later
use crate::adb::{AdbError, AdbResult, AdbShell, CommandRunner};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const APP_FOLDER: &str = "AndroidDebloater";
const BACKUPS_FOLDER: &str = "backups";

/// Newest backup folder for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupEntry {
    pub package: String,
    pub dir: PathBuf,
    pub timestamp: u64,
}

impl BackupEntry {
    /// Local date and time the backup was taken, or "unknown date" when the
    /// folder name carried no usable timestamp.
    pub fn created_label(&self) -> String {
        i64::try_from(self.timestamp)
            .ok()
            .filter(|ts| *ts > 0)
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
            .map(|utc| {
                utc.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| "unknown date".to_string())
    }
}

/// Folder tree of `<root>/<package>-<unix seconds>/*.apk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupStore {
    root: PathBuf,
}

impl BackupStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `Documents/AndroidDebloater/backups`, falling back to the home directory.
    pub fn default_location() -> Self {
        let base = directories::UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
            .or_else(|| homedir::my_home().ok().flatten())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(APP_FOLDER).join(BACKUPS_FOLDER))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir_for(&self, package: &str, timestamp: u64) -> PathBuf {
        self.root.join(format!("{package}-{timestamp}"))
    }

    /// Pulls every APK of `package` into a fresh timestamped folder.
    pub async fn backup<R: CommandRunner>(
        &self,
        adb: &AdbShell<R>,
        package: &str,
    ) -> AdbResult<PathBuf> {
        let apk_paths = adb.apk_paths(package).await?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let dest_dir = self.dir_for(package, timestamp);
        tokio::fs::create_dir_all(&dest_dir)
            .await
            .map_err(|e| AdbError::io("Failed to create backup dir", e))?;

        for remote in &apk_paths {
            adb.pull(remote, &dest_dir).await?;
        }

        log::info!(
            "Backed up {} APK(s) of {} to {}",
            apk_paths.len(),
            package,
            dest_dir.display()
        );
        Ok(dest_dir)
    }

    /// Newest backup per package, sorted by package name. A missing root is empty, not an error.
    pub fn latest(&self) -> AdbResult<Vec<BackupEntry>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut latest_by_pkg: HashMap<String, BackupEntry> = HashMap::new();
        let entries = std::fs::read_dir(&self.root)
            .map_err(|e| AdbError::io("Failed to read backups root", e))?;
        for entry in entries {
            let entry = entry.map_err(|e| AdbError::io("Dir entry error", e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some((package, timestamp)) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(parse_backup_dir_name)
            else {
                continue;
            };
            let candidate = BackupEntry {
                package: package.clone(),
                dir: path,
                timestamp,
            };
            latest_by_pkg
                .entry(package)
                .and_modify(|current| {
                    if candidate.timestamp > current.timestamp {
                        *current = candidate.clone();
                    }
                })
                .or_insert(candidate);
        }

        let mut list: Vec<BackupEntry> = latest_by_pkg.into_values().collect();
        list.sort_by(|a, b| a.package.cmp(&b.package));
        Ok(list)
    }
}

/// Reinstalls the APKs found directly inside `dir`.
pub async fn restore_backup<R: CommandRunner>(adb: &AdbShell<R>, dir: &Path) -> AdbResult<String> {
    if !dir.is_dir() {
        return Err(AdbError::InvalidBackupDir {
            path: dir.to_path_buf(),
        });
    }
    let apks = collect_apks(dir)?;
    if apks.is_empty() {
        return Err(AdbError::NoApkFiles {
            path: dir.to_path_buf(),
        });
    }

    let output = adb.install(&apks).await?;
    log::info!("Restored {} APK(s) from {}", apks.len(), dir.display());
    Ok(format!(
        "Restored {} APK(s) from {}\n{}",
        apks.len(),
        dir.display(),
        output.trim()
    ))
}

/// Splits `<package>-<timestamp>` on the last dash. An unreadable timestamp counts as 0.
pub fn parse_backup_dir_name(name: &str) -> Option<(String, u64)> {
    let idx = name.rfind('-')?;
    let package = &name[..idx];
    let timestamp = name[idx + 1..].parse::<u64>().unwrap_or(0);
    Some((package.to_string(), timestamp))
}

/// `.apk` files (any case) directly inside `dir`, sorted by file name so the base APK
/// usually leads a split set.
pub fn collect_apks(dir: &Path) -> AdbResult<Vec<PathBuf>> {
    let mut apks = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| AdbError::io("Failed to read dir", e))?;
    for entry in entries {
        let path = entry
            .map_err(|e| AdbError::io("Dir entry error", e))?
            .path();
        let is_apk = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("apk"));
        if path.is_file() && is_apk {
            apks.push(path);
        }
    }
    apks.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(apks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adb::testing::ScriptedRunner;
    use std::fs;

    #[test]
    fn parse_dir_name_uses_last_dash() {
        assert_eq!(
            parse_backup_dir_name("com.sec-android.app-1700000000"),
            Some(("com.sec-android.app".to_string(), 1_700_000_000))
        );
        assert_eq!(
            parse_backup_dir_name("com.a-notanumber"),
            Some(("com.a".to_string(), 0))
        );
        assert_eq!(parse_backup_dir_name("nodash"), None);
    }

    #[test]
    fn latest_keeps_newest_per_package_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path());
        for name in ["com.b-100", "com.a-5", "com.b-300", "com.b-200", "com.a-1"] {
            fs::create_dir_all(tmp.path().join(name)).unwrap();
        }
        fs::write(tmp.path().join("com.c-999"), b"not a dir").unwrap();

        let latest = store.latest().unwrap();

        assert_eq!(
            latest,
            vec![
                BackupEntry {
                    package: "com.a".into(),
                    dir: tmp.path().join("com.a-5"),
                    timestamp: 5
                },
                BackupEntry {
                    package: "com.b".into(),
                    dir: tmp.path().join("com.b-300"),
                    timestamp: 300
                },
            ]
        );
    }

    #[test]
    fn created_label_is_a_local_date() {
        let entry = |timestamp| BackupEntry {
            package: "com.a".into(),
            dir: PathBuf::from("com.a-x"),
            timestamp,
        };

        let label = entry(1_700_000_000).created_label();
        let expected = chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(label, expected);
        assert!(chrono::NaiveDateTime::parse_from_str(&label, "%Y-%m-%d %H:%M:%S").is_ok());

        assert_eq!(entry(0).created_label(), "unknown date");
        assert_eq!(entry(u64::MAX).created_label(), "unknown date");
    }

    #[test]
    fn latest_on_missing_root_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path().join("never-created"));
        assert!(store.latest().unwrap().is_empty());
    }

    #[test]
    fn collect_apks_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["split_config.en.apk", "base.APK", "notes.txt"] {
            fs::write(tmp.path().join(name), b"x").unwrap();
        }
        fs::create_dir(tmp.path().join("nested.apk")).unwrap();

        let apks = collect_apks(tmp.path()).unwrap();
        let names: Vec<_> = apks
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["base.APK", "split_config.en.apk"]);
    }

    #[tokio::test]
    async fn backup_pulls_every_apk_into_timestamped_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path());
        let shell = ScriptedRunner::new()
            .ok("package:/data/app/com.a-1/base.apk\npackage:/data/app/com.a-1/split_config.en.apk\n")
            .ok("1 file pulled")
            .ok("1 file pulled")
            .into_shell();

        let dir = store.backup(&shell, "com.a").await.unwrap();

        assert!(dir.is_dir());
        assert!(dir.starts_with(tmp.path()));
        let (package, timestamp) =
            parse_backup_dir_name(dir.file_name().unwrap().to_str().unwrap()).unwrap();
        assert_eq!(package, "com.a");
        assert!(timestamp > 0);

        let calls = shell.runner().calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1][0], "pull");
        assert_eq!(calls[1][1], "/data/app/com.a-1/base.apk");
        assert_eq!(calls[2][1], "/data/app/com.a-1/split_config.en.apk");
    }

    #[tokio::test]
    async fn backup_aborts_on_failed_pull() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path());
        let shell = ScriptedRunner::new()
            .ok("package:/data/app/com.a-1/base.apk\n")
            .fail("remote object does not exist")
            .into_shell();

        let err = store.backup(&shell, "com.a").await.unwrap_err();
        assert!(matches!(err, AdbError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn restore_uses_install_multiple_for_split_sets() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("base.apk"), b"x").unwrap();
        fs::write(tmp.path().join("split_config.en.apk"), b"x").unwrap();
        let shell = ScriptedRunner::new().ok("Success\n").into_shell();

        let message = restore_backup(&shell, tmp.path()).await.unwrap();

        assert!(message.starts_with("Restored 2 APK(s) from"));
        let calls = shell.runner().calls();
        assert_eq!(calls[0][..4], ["install-multiple", "-r", "--user", "0"]);
        assert!(calls[0][4].ends_with("base.apk"));
    }

    #[tokio::test]
    async fn restore_accepts_folder_outside_store_root() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackupStore::new(tmp.path().join("store"));
        fs::create_dir_all(store.dir_for("com.a", 300)).unwrap();

        // an older copy the user moved elsewhere
        let picked = tmp.path().join("usb-stick").join("com.a-100");
        fs::create_dir_all(&picked).unwrap();
        fs::write(picked.join("base.apk"), b"x").unwrap();
        assert!(!picked.starts_with(store.root()));
        assert!(store.latest().unwrap().iter().all(|e| e.dir != picked));

        let shell = ScriptedRunner::new().ok("Performing Streamed Install\nSuccess\n").into_shell();
        let message = restore_backup(&shell, &picked).await.unwrap();

        assert!(message.starts_with(&format!("Restored 1 APK(s) from {}", picked.display())));
        let calls = shell.runner().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][..4], ["install", "-r", "--user", "0"]);
        assert_eq!(calls[0][4], picked.join("base.apk").to_string_lossy());
    }

    #[tokio::test]
    async fn restore_rejects_empty_or_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let shell = ScriptedRunner::new().into_shell();

        let err = restore_backup(&shell, tmp.path()).await.unwrap_err();
        assert!(matches!(err, AdbError::NoApkFiles { .. }));

        let err = restore_backup(&shell, &tmp.path().join("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdbError::InvalidBackupDir { .. }));
        assert!(shell.runner().calls().is_empty());
    }
}
