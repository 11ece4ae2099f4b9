// Batch uninstall with per-package outcomes
use super::backup::BackupStore;
use crate::adb::{AdbShell, CommandRunner};
use std::path::PathBuf;

/// What `pm uninstall` reported for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    Success,
    Failure(String),
    Unexpected(String),
    /// Empty identifier; adb was not invoked.
    Skipped,
}

/// Classifies free-text `pm uninstall` output by substring.
pub fn classify_uninstall_output(stdout: &str) -> UninstallOutcome {
    if stdout.contains("Success") {
        UninstallOutcome::Success
    } else if stdout.contains("Failure") {
        UninstallOutcome::Failure(stdout.trim().to_string())
    } else {
        UninstallOutcome::Unexpected(stdout.trim().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UninstallReport {
    pub package: String,
    pub outcome: UninstallOutcome,
    pub backup_dir: Option<PathBuf>,
}

impl UninstallReport {
    pub fn is_success(&self) -> bool {
        self.outcome == UninstallOutcome::Success
    }

    pub fn title(&self) -> &'static str {
        match self.outcome {
            UninstallOutcome::Success => "Success",
            UninstallOutcome::Skipped => "Warning",
            _ => "Error",
        }
    }

    /// Dialog text shown for this package.
    pub fn message(&self) -> String {
        let pkg = &self.package;
        let mut text = match &self.outcome {
            UninstallOutcome::Success => format!("Package {pkg} uninstalled."),
            UninstallOutcome::Failure(reason) => format!("Failed to uninstall {pkg}: {reason}"),
            UninstallOutcome::Unexpected(raw) => format!("Unexpected response for {pkg}: {raw}"),
            UninstallOutcome::Skipped => "Package name is empty or invalid.".to_string(),
        };
        if let Some(dir) = &self.backup_dir {
            text.push_str(&format!("\nBackup saved to: {}", dir.display()));
        }
        text
    }
}

/// Uninstalls each selected package in order, optionally backing up its APKs first.
///
/// A failure for one package never stops the rest; `on_report` fires as each
/// package finishes so the caller can surface it immediately.
pub struct Uninstaller<'a, R> {
    adb: &'a AdbShell<R>,
    backups: Option<&'a BackupStore>,
}

impl<'a, R: CommandRunner> Uninstaller<'a, R> {
    pub fn new(adb: &'a AdbShell<R>) -> Self {
        Self { adb, backups: None }
    }

    pub fn with_backups(mut self, store: &'a BackupStore) -> Self {
        self.backups = Some(store);
        self
    }

    pub async fn run<F>(&self, selected: &[String], mut on_report: F) -> Vec<UninstallReport>
    where
        F: FnMut(&UninstallReport),
    {
        let mut reports = Vec::with_capacity(selected.len());
        for package in selected {
            let report = self.uninstall_one(package).await;
            on_report(&report);
            reports.push(report);
        }
        reports
    }

    async fn uninstall_one(&self, package: &str) -> UninstallReport {
        log::debug!("Uninstalling package: {package}");
        let package = package.trim();
        let report = |outcome, backup_dir| UninstallReport {
            package: package.to_string(),
            outcome,
            backup_dir,
        };

        if package.is_empty() {
            log::warn!("Package name is empty or invalid.");
            return report(UninstallOutcome::Skipped, None);
        }

        let backup_dir = match self.backups {
            Some(store) => match store.backup(self.adb, package).await {
                Ok(dir) => Some(dir),
                Err(e) => {
                    log::error!("Backup of {package} failed, not uninstalling: {e}");
                    return report(
                        UninstallOutcome::Failure(format!("backup failed: {e}")),
                        None,
                    );
                }
            },
            None => None,
        };

        let outcome = match self.adb.uninstall(package).await {
            Ok(stdout) => classify_uninstall_output(&stdout),
            Err(e) => UninstallOutcome::Failure(e.to_string()),
        };
        match &outcome {
            UninstallOutcome::Success => log::info!("{package} uninstalled successfully."),
            UninstallOutcome::Failure(reason) => {
                log::error!("Failed to uninstall {package}: {reason}")
            }
            UninstallOutcome::Unexpected(raw) => {
                log::error!("Unexpected response for {package}: {raw}")
            }
            UninstallOutcome::Skipped => {}
        }
        report(outcome, backup_dir)
    }
}
