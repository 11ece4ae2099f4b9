use crate::adb::AdbError;
use crate::gui::controller::{Activity, DeviceState, Dialog, DialogLevel, UiAction};
use crate::gui::hooks::types::*;
use crate::packages::{Uninstaller, restore_backup, search_online_url};
use crate::update::{RELEASES_PAGE_URL, UpdateStatus, spawn_update_check};
use dioxus::prelude::*;
use std::path::PathBuf;

/// Routes every [`UiAction`] to the matching adb/update work and folds the
/// result back into the signals.
///
/// Copy, so event handlers and spawned futures can each hold one.
#[derive(Clone, Copy)]
pub struct Dispatcher {
    pub device: DeviceSignals,
    pub packages: PackageSignals,
    pub backups: BackupSignals,
    pub status: StatusSignals,
    services: Signal<Services>,
}

/// Creates all window state. `make_services` runs once, on first render.
pub fn use_dispatcher(make_services: impl FnOnce() -> Services, backup_default: bool) -> Dispatcher {
    Dispatcher {
        device: use_device_signals(),
        packages: use_package_signals(backup_default),
        backups: use_backup_signals(),
        status: use_status_signals(),
        services: use_signal(make_services),
    }
}

impl Dispatcher {
    pub fn services(&self) -> Services {
        self.services.peek().clone()
    }

    pub fn dispatch(self, action: UiAction) {
        log::trace!("UI action: {action:?}");
        match action {
            UiAction::RefreshDevices => self.refresh_devices(),
            UiAction::ListPackages => self.list_packages(),
            UiAction::Search(query) => {
                let mut list = self.packages.list;
                list.write().set_query(query);
            }
            UiAction::ToggleSelect(package) => {
                let mut list = self.packages.list;
                list.write().toggle(&package);
            }
            UiAction::SetBackup(enabled) => {
                let mut backup_enabled = self.packages.backup_enabled;
                backup_enabled.set(enabled);
                log::debug!("Backup before uninstall: {enabled}");
            }
            UiAction::RequestUninstall => self.request_uninstall(),
            UiAction::ConfirmUninstall(selected) => self.uninstall(selected),
            UiAction::RequestReboot => self.notify(Dialog::confirm(
                "Confirm Reboot",
                "Are you sure you want to reboot the device?",
                "The device will restart immediately.",
                UiAction::ConfirmReboot,
            )),
            UiAction::ConfirmReboot => self.reboot(),
            UiAction::CheckUpdates => self.check_updates(),
            UiAction::OpenReleasePage => self.open_in_browser(RELEASES_PAGE_URL),
            UiAction::SearchOnline(package) => self.open_in_browser(&search_online_url(&package)),
            UiAction::LoadBackups => self.load_backups(),
            UiAction::PickRestoreFolder => self.pick_restore_folder(),
            UiAction::RequestRestore(dir) => self.request_restore(dir),
            UiAction::ConfirmRestore(dir) => self.restore(dir),
            UiAction::AcceptDialog => self.answer_dialog(true),
            UiAction::DismissDialog => self.answer_dialog(false),
        }
    }

    fn set_status(mut self, message: impl Into<String>) {
        self.status.message.set(message.into());
    }

    fn notify(mut self, dialog: Dialog) {
        self.status.dialogs.write().push(dialog);
    }

    /// Marks `activity` as running, or reports what is already running.
    fn begin(mut self, activity: Activity) -> bool {
        let started = self.status.activity.write().try_begin(activity);
        match started {
            Ok(()) => {
                self.set_status(activity.status_text());
                true
            }
            Err(msg) => {
                log::warn!("Rejected {}: {msg}", activity.label());
                self.set_status(msg);
                false
            }
        }
    }

    fn finish(mut self) {
        self.status.activity.write().finish();
    }

    fn answer_dialog(mut self, yes: bool) {
        let next = self.status.dialogs.write().answer(yes);
        if let Some(action) = next {
            self.dispatch(action);
        }
    }

    fn refresh_devices(self) {
        if !self.begin(Activity::RefreshingDevices) {
            return;
        }
        let adb = self.services().adb;
        let mut this = self;
        spawn(async move {
            let state = DeviceState::from_scan(adb.list_devices().await);
            let status = match (&state.error, state.devices.len()) {
                (Some(err), _) => format!("❌ {err}"),
                (None, 0) => "🔌 No devices connected".to_string(),
                (None, n) => format!("📱 {n} device(s) connected"),
            };
            this.device.state.set(state);
            this.set_status(status);
            this.finish();
        });
    }

    fn list_packages(mut self) {
        if !self.device.state.read().actions_enabled() {
            self.set_status("No devices connected");
            return;
        }
        if !self.begin(Activity::Listing) {
            return;
        }
        self.packages.list.write().clear();
        let adb = self.services().adb;
        spawn(async move {
            match adb.list_packages().await {
                Ok(found) if found.is_empty() => {
                    log::warn!("No packages found or device not connected.");
                    self.notify(Dialog::message(
                        DialogLevel::Warning,
                        "Error",
                        "No packages found or device not connected.",
                    ));
                    self.set_status("No packages found");
                }
                Ok(found) => {
                    log::info!("Listed {} packages", found.len());
                    let label = self.packages.list.with_mut(|list| {
                        list.replace(found);
                        list.count_label()
                    });
                    self.set_status(label);
                }
                Err(e) => {
                    log::error!("Error listing packages: {e}");
                    self.notify(Dialog::message(
                        DialogLevel::Error,
                        "Error",
                        format!("Error listing packages: {e}"),
                    ));
                    self.set_status("❌ Package scan failed");
                }
            }
            self.finish();
        });
    }

    fn request_uninstall(self) {
        let selected = self.packages.list.read().selected_in_order();
        if selected.is_empty() {
            self.notify(Dialog::message(
                DialogLevel::Warning,
                "Warning",
                "No packages selected.",
            ));
            return;
        }
        self.notify(Dialog::confirm(
            "Confirm Uninstall",
            format!(
                "Are you sure you want to uninstall {} packages?",
                selected.len()
            ),
            "This action cannot be undone!",
            UiAction::ConfirmUninstall(selected),
        ));
    }

    fn uninstall(mut self, selected: Vec<String>) {
        if !self.begin(Activity::Uninstalling) {
            return;
        }
        let services = self.services();
        let backup = *self.packages.backup_enabled.read();
        let total = selected.len();
        self.packages.progress.set(Some((0, total)));
        log::info!("Uninstalling {total} package(s), backup={backup}");

        spawn(async move {
            let mut uninstaller = Uninstaller::new(&services.adb);
            if backup {
                uninstaller = uninstaller.with_backups(&services.backups);
            }

            let mut done = 0;
            let mut this = self;
            let reports = uninstaller
                .run(&selected, move |report| {
                    done += 1;
                    this.packages.progress.set(Some((done, total)));
                    let level = if report.is_success() {
                        DialogLevel::Info
                    } else {
                        DialogLevel::Error
                    };
                    this.notify(Dialog::message(level, report.title(), report.message()));
                })
                .await;

            let removed = reports.iter().filter(|r| r.is_success()).count();
            self.packages.list.with_mut(|list| {
                for report in &reports {
                    list.deselect(&report.package);
                }
            });
            self.packages.progress.set(None);
            self.set_status(format!("Uninstalled {removed} of {total} packages"));
            self.finish();
            if backup {
                self.load_backups();
            }
        });
    }

    fn reboot(self) {
        if !self.begin(Activity::Rebooting) {
            return;
        }
        let adb = self.services().adb;
        spawn(async move {
            match adb.reboot().await {
                Ok(()) => {
                    log::info!("Device reboot initiated");
                    self.set_status("Device is rebooting...");
                }
                Err(e) => {
                    log::error!("Reboot error: {e}");
                    let reason = match &e {
                        AdbError::CommandFailed { stderr, .. } => stderr.clone(),
                        other => other.to_string(),
                    };
                    self.notify(Dialog::message(
                        DialogLevel::Error,
                        "Error",
                        format!("Failed to reboot device: {reason}"),
                    ));
                    self.set_status("❌ Reboot failed");
                }
            }
            self.finish();
        });
    }

    fn check_updates(mut self) {
        let started = self.status.activity.write().try_begin_update_check();
        if let Err(msg) = started {
            self.set_status(msg);
            return;
        }
        self.set_status(Activity::CheckingUpdate.status_text());
        let current = self.services().current_version;

        spawn(async move {
            let outcome = spawn_update_check(current)
                .await
                .unwrap_or_else(|_| UpdateStatus::Error("update task ended unexpectedly".into()));
            match outcome {
                UpdateStatus::Found(version) => {
                    self.set_status(format!("New version {version} available"));
                    self.notify(Dialog::confirm(
                        "Update Available",
                        format!("New version {version} available!"),
                        "Would you like to open the download page?",
                        UiAction::OpenReleasePage,
                    ));
                }
                UpdateStatus::NotFound(msg) => self.set_status(msg),
                UpdateStatus::Error(msg) => self.set_status(format!("Update check failed: {msg}")),
            }
            self.status.activity.write().finish_update_check();
        });
    }

    fn open_in_browser(self, url: &str) {
        log::info!("Opening {url}");
        if let Err(e) = open::that(url) {
            log::error!("Failed to open browser for {url}: {e}");
            self.set_status(format!("❌ Could not open browser: {e}"));
        }
    }

    fn load_backups(mut self) {
        let store = self.services().backups;
        match store.latest() {
            Ok(entries) => {
                log::debug!(
                    "Found {} backup(s) under {}",
                    entries.len(),
                    store.root().display()
                );
                self.backups.entries.set(entries);
            }
            Err(e) => {
                log::error!("Failed to read backups: {e}");
                self.set_status(format!("❌ Failed to read backups: {e}"));
            }
        }
    }

    /// Native folder dialog for backups that are older or stored elsewhere.
    fn pick_restore_folder(self) {
        let start_dir = self.services().backups.root().to_path_buf();
        spawn(async move {
            let picked = rfd::AsyncFileDialog::new()
                .set_title("Select backup folder")
                .set_directory(&start_dir)
                .pick_folder()
                .await;
            match picked {
                Some(folder) => {
                    let dir = folder.path().to_path_buf();
                    log::debug!("Picked backup folder {}", dir.display());
                    self.dispatch(UiAction::RequestRestore(dir));
                }
                None => log::debug!("Backup folder selection cancelled"),
            }
        });
    }

    fn request_restore(self, dir: PathBuf) {
        self.notify(Dialog::confirm(
            "Restore Backup",
            format!("Reinstall the APKs saved in {}?", dir.display()),
            "The package is installed again for user 0.",
            UiAction::ConfirmRestore(dir),
        ));
    }

    fn restore(self, dir: PathBuf) {
        if !self.begin(Activity::Restoring) {
            return;
        }
        let adb = self.services().adb;
        spawn(async move {
            match restore_backup(&adb, &dir).await {
                Ok(summary) => {
                    self.notify(Dialog::message(DialogLevel::Info, "Restored", summary));
                    self.set_status(format!("✅ Restored {}", dir.display()));
                }
                Err(e) => {
                    log::error!("Restore from {} failed: {e}", dir.display());
                    self.notify(Dialog::message(
                        DialogLevel::Error,
                        "Error",
                        format!("Restore failed: {e}"),
                    ));
                    self.set_status("❌ Restore failed");
                }
            }
            self.finish();
        });
    }
}
