use crate::gui::controller::{Dialog, DialogLevel, UiAction};
use crate::gui::hooks::dispatch::Dispatcher;
use dioxus::prelude::*;

/// First-render work: check that adb runs, scan devices, read existing backups.
pub fn use_startup(dispatcher: Dispatcher) {
    use_hook(move || {
        let adb = dispatcher.services().adb;
        log::info!("Using adb at {}", adb.adb_path().display());
        spawn(async move {
            if let Err(e) = adb.ensure_available().await {
                log::error!("adb check failed: {e}");
                if e.is_adb_missing() {
                    let mut status = dispatcher.status;
                    status.dialogs.write().push(Dialog::message(
                        DialogLevel::Error,
                        "ADB not found",
                        e.to_string(),
                    ));
                }
            }
            dispatcher.dispatch(UiAction::RefreshDevices);
        });
        dispatcher.dispatch(UiAction::LoadBackups);
    });
}
