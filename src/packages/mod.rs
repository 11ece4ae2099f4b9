// Package operations built on top of the adb bridge

pub mod backup;
pub mod filter;
pub mod uninstall;

pub use backup::{BackupEntry, BackupStore, restore_backup};
pub use filter::filter_packages;
pub use uninstall::{UninstallOutcome, UninstallReport, Uninstaller, classify_uninstall_output};

/// Google search URL used by the "Search Online" action on a package row.
pub fn search_online_url(package: &str) -> String {
    format!("https://www.google.com/search?q={package}+android+package+info")
}
