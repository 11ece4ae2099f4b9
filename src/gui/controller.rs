// UI state that does not depend on dioxus: activity guard, device/package
// state, dialog queue and the action vocabulary the dispatcher understands.
use crate::adb::{AdbResult, Device};
use crate::packages::filter_packages;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

/// Long-running work the window can be busy with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    RefreshingDevices,
    Listing,
    Uninstalling,
    Rebooting,
    Restoring,
    CheckingUpdate,
}

impl Activity {
    pub fn label(self) -> &'static str {
        match self {
            Activity::Idle => "Idle",
            Activity::RefreshingDevices => "Device refresh",
            Activity::Listing => "Package scan",
            Activity::Uninstalling => "Uninstall",
            Activity::Rebooting => "Reboot",
            Activity::Restoring => "Restore",
            Activity::CheckingUpdate => "Update check",
        }
    }

    /// Status-line text shown while the activity runs.
    pub fn status_text(self) -> &'static str {
        match self {
            Activity::Idle => "",
            Activity::RefreshingDevices => "Detecting devices...",
            Activity::Listing => "Scanning for installed packages...",
            Activity::Uninstalling => "Uninstalling selected packages...",
            Activity::Rebooting => "Rebooting device...",
            Activity::Restoring => "Restoring backup...",
            Activity::CheckingUpdate => "Checking for updates...",
        }
    }
}

/// Rejects a second long-running action while one is in flight.
///
/// The update check runs on its own task and is tracked separately, so it
/// never blocks device actions, but two checks cannot overlap either.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActivityTracker {
    current: Activity,
    update_check_running: bool,
}

impl ActivityTracker {
    pub fn current(&self) -> Activity {
        self.current
    }

    pub fn is_busy(&self) -> bool {
        self.current != Activity::Idle
    }

    pub fn is_checking_update(&self) -> bool {
        self.update_check_running
    }

    pub fn try_begin(&mut self, next: Activity) -> Result<(), String> {
        if self.is_busy() {
            return Err(format!(
                "{} in progress, please wait",
                self.current.label()
            ));
        }
        self.current = next;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.current = Activity::Idle;
    }

    pub fn try_begin_update_check(&mut self) -> Result<(), String> {
        if self.update_check_running {
            return Err(format!(
                "{} in progress, please wait",
                Activity::CheckingUpdate.label()
            ));
        }
        self.update_check_running = true;
        Ok(())
    }

    pub fn finish_update_check(&mut self) {
        self.update_check_running = false;
    }
}

/// Result of the last `adb devices` scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceState {
    pub devices: Vec<Device>,
    pub error: Option<String>,
}

impl DeviceState {
    /// Any scan error becomes an empty device list plus a logged error.
    pub fn from_scan(scan: AdbResult<Vec<Device>>) -> Self {
        match scan {
            Ok(devices) => {
                if devices.is_empty() {
                    log::info!("No devices connected");
                } else {
                    log::info!("Connected devices: {}", devices.len());
                }
                Self {
                    devices,
                    error: None,
                }
            }
            Err(e) => {
                log::error!("Error refreshing devices: {e}");
                Self {
                    devices: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// List, uninstall and reboot are only offered with a device attached.
    pub fn actions_enabled(&self) -> bool {
        !self.devices.is_empty()
    }

    pub fn display_lines(&self) -> Vec<String> {
        if self.error.is_some() {
            vec!["Error detecting devices".to_string()]
        } else if self.devices.is_empty() {
            vec!["No devices connected".to_string()]
        } else {
            self.devices.iter().map(ToString::to_string).collect()
        }
    }
}

/// Listed packages, the current search query and the user's selection.
///
/// The selection is kept by name and survives query changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageState {
    all: Vec<String>,
    query: String,
    selected: HashSet<String>,
}

impl PackageState {
    pub fn replace(&mut self, packages: Vec<String>) {
        self.all = packages;
        self.selected.clear();
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn all(&self) -> &[String] {
        &self.all
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn visible(&self) -> Vec<String> {
        filter_packages(&self.all, &self.query)
    }

    pub fn toggle(&mut self, package: &str) {
        if !self.selected.remove(package) {
            self.selected.insert(package.to_string());
        }
    }

    pub fn is_selected(&self, package: &str) -> bool {
        self.selected.contains(package)
    }

    pub fn deselect(&mut self, package: &str) {
        self.selected.remove(package);
    }

    /// Selected names in list order, each once.
    pub fn selected_in_order(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.all
            .iter()
            .filter(|pkg| self.selected.contains(*pkg) && seen.insert(pkg.as_str()))
            .cloned()
            .collect()
    }

    pub fn count_label(&self) -> String {
        format!("{} packages found", self.all.len())
    }
}

/// Everything a button, row or dialog can ask the dispatcher to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    RefreshDevices,
    ListPackages,
    Search(String),
    ToggleSelect(String),
    SetBackup(bool),
    RequestUninstall,
    ConfirmUninstall(Vec<String>),
    RequestReboot,
    ConfirmReboot,
    CheckUpdates,
    OpenReleasePage,
    SearchOnline(String),
    LoadBackups,
    PickRestoreFolder,
    RequestRestore(PathBuf),
    ConfirmRestore(PathBuf),
    AcceptDialog,
    DismissDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Confirm {
        title: String,
        text: String,
        detail: String,
        on_yes: UiAction,
    },
    Message {
        level: DialogLevel,
        title: String,
        text: String,
    },
}

impl Dialog {
    pub fn confirm(
        title: impl Into<String>,
        text: impl Into<String>,
        detail: impl Into<String>,
        on_yes: UiAction,
    ) -> Self {
        Dialog::Confirm {
            title: title.into(),
            text: text.into(),
            detail: detail.into(),
            on_yes,
        }
    }

    pub fn message(level: DialogLevel, title: impl Into<String>, text: impl Into<String>) -> Self {
        Dialog::Message {
            level,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Dialog::Confirm { title, .. } | Dialog::Message { title, .. } => title,
        }
    }
}

/// Modal dialogs shown one at a time, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogQueue {
    pending: VecDeque<Dialog>,
}

impl DialogQueue {
    pub fn push(&mut self, dialog: Dialog) {
        self.pending.push_back(dialog);
    }

    pub fn front(&self) -> Option<&Dialog> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Closes the front dialog and returns the follow-up action, if the user
    /// said yes to a confirmation.
    pub fn answer(&mut self, yes: bool) -> Option<UiAction> {
        match self.pending.pop_front()? {
            Dialog::Confirm { on_yes, title, .. } => {
                if yes {
                    Some(on_yes)
                } else {
                    log::debug!("User cancelled: {title}");
                    None
                }
            }
            Dialog::Message { .. } => None,
        }
    }
}
