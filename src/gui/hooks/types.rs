use crate::adb::AdbShell;
use crate::gui::controller::{ActivityTracker, DeviceState, DialogQueue, PackageState};
use crate::packages::{BackupEntry, BackupStore};
use dioxus::prelude::*;

/// Uninstall progress: (done, total)
pub type Progress = Option<(usize, usize)>;

// ============================================================================
// GROUPED SIGNAL STRUCTS - one handle per screen area
// ============================================================================

/// Connected devices and the last scan error
#[derive(Clone, Copy)]
pub struct DeviceSignals {
    pub state: Signal<DeviceState>,
}

/// Package list, selection and uninstall options
#[derive(Clone, Copy)]
pub struct PackageSignals {
    pub list: Signal<PackageState>,
    pub backup_enabled: Signal<bool>, // "Back up APKs before uninstall"
    pub progress: Signal<Progress>,
}

/// Saved APK backups shown in the Backups panel
#[derive(Clone, Copy)]
pub struct BackupSignals {
    pub entries: Signal<Vec<BackupEntry>>,
}

/// Busy guard, status line and modal dialogs
#[derive(Clone, Copy)]
pub struct StatusSignals {
    pub activity: Signal<ActivityTracker>,
    pub message: Signal<String>,
    pub dialogs: Signal<DialogQueue>,
}

/// Handles to adb and the filesystem, fixed for the window's lifetime
#[derive(Clone)]
pub struct Services {
    pub adb: AdbShell,
    pub backups: BackupStore,
    pub current_version: String,
}

pub fn use_device_signals() -> DeviceSignals {
    DeviceSignals {
        state: use_signal(DeviceState::default),
    }
}

pub fn use_package_signals(backup_default: bool) -> PackageSignals {
    PackageSignals {
        list: use_signal(PackageState::default),
        backup_enabled: use_signal(move || backup_default),
        progress: use_signal(|| None),
    }
}

pub fn use_backup_signals() -> BackupSignals {
    BackupSignals {
        entries: use_signal(Vec::new),
    }
}

pub fn use_status_signals() -> StatusSignals {
    StatusSignals {
        activity: use_signal(ActivityTracker::default),
        message: use_signal(|| "Initializing...".to_string()),
        dialogs: use_signal(DialogQueue::default),
    }
}
