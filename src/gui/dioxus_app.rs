use crate::adb::AdbShell;
use crate::args::Args;
use crate::gui::components::{
    actions::Actions, backups_panel::BackupsPanel, device_panel::DevicePanel,
    dialog::DialogOverlay, header::Header, package_list::PackageList, status_bar::StatusBar,
};
use crate::gui::controller::{Activity, UiAction};
use crate::gui::hooks::{Services, use_dispatcher, use_startup};
use crate::packages::BackupStore;
use dioxus::prelude::*;
use std::sync::OnceLock;

static LAUNCH_ARGS: OnceLock<Args> = OnceLock::new();

fn launch_args() -> Args {
    LAUNCH_ARGS.get().cloned().unwrap_or_default()
}

pub fn run_gui(args: Args) {
    use dioxus::desktop::{Config, WindowBuilder};
    if LAUNCH_ARGS.set(args).is_err() {
        log::warn!("GUI already launched once; keeping the first arguments");
    }
    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title(format!("Android Debloater v{}", env!("APP_VERSION_DISPLAY")))
            .with_resizable(true)
            .with_inner_size(dioxus::desktop::LogicalSize::new(600, 800)),
    );
    dioxus::LaunchBuilder::desktop().with_cfg(config).launch(App);
}

#[component]
fn App() -> Element {
    let args = launch_args();
    let adb_override = args.adb_path.clone();
    let ui = use_dispatcher(
        move || Services {
            adb: AdbShell::locate(adb_override.as_deref()),
            backups: BackupStore::default_location(),
            current_version: env!("APP_VERSION_SEMVER").to_string(),
        },
        args.backup_before_uninstall,
    );
    use_startup(ui);

    let devices = ui.device.state.read().clone();
    let tracker = ui.status.activity.read().clone();
    let busy = tracker.is_busy();
    let connected = devices.actions_enabled();

    let (query, count_label, visible, selected, selected_count) = {
        let list = ui.packages.list.read();
        let visible = list.visible();
        let selected: Vec<bool> = visible.iter().map(|p| list.is_selected(p)).collect();
        let count_label = if list.all().is_empty() {
            String::new()
        } else {
            list.count_label()
        };
        (
            list.query().to_string(),
            count_label,
            visible,
            selected,
            list.selected_in_order().len(),
        )
    };

    let dialogs = ui.status.dialogs.read();
    let front_dialog = dialogs.front().cloned();
    let queued = dialogs.len().saturating_sub(1);
    drop(dialogs);

    let backup_root = ui.services().backups.root().display().to_string();
    let build_year = env!("APP_BUILD_YEAR");

    rsx! {
        div { style: "height:97vh; display:flex; flex-direction:column; background:#1e1e1e; color:#e0e0e0; font-family:sans-serif;",
            div { style: "flex:1; overflow:auto; padding:8px; display:flex; flex-direction:column; gap:10px;",
                Header {
                    version: env!("APP_VERSION_DISPLAY").to_string(),
                    checking: tracker.is_checking_update(),
                    on_check_updates: move |_| ui.dispatch(UiAction::CheckUpdates),
                }
                DevicePanel {
                    lines: devices.display_lines(),
                    connected: connected,
                    has_error: devices.error.is_some(),
                    busy: busy,
                    on_refresh: move |_| ui.dispatch(UiAction::RefreshDevices),
                }
                Actions {
                    enabled: connected,
                    busy: busy,
                    listing: tracker.current() == Activity::Listing,
                    selected_count: selected_count,
                    backup_enabled: *ui.packages.backup_enabled.read(),
                    on_list: move |_| ui.dispatch(UiAction::ListPackages),
                    on_uninstall: move |_| ui.dispatch(UiAction::RequestUninstall),
                    on_reboot: move |_| ui.dispatch(UiAction::RequestReboot),
                    on_backup_toggle: move |checked| ui.dispatch(UiAction::SetBackup(checked)),
                }
                PackageList {
                    query: query,
                    count_label: count_label,
                    visible: visible,
                    selected: selected,
                    on_search: move |q| ui.dispatch(UiAction::Search(q)),
                    on_toggle: move |pkg| ui.dispatch(UiAction::ToggleSelect(pkg)),
                    on_search_online: move |pkg| ui.dispatch(UiAction::SearchOnline(pkg)),
                }
                BackupsPanel {
                    entries: ui.backups.entries.read().clone(),
                    root: backup_root,
                    busy: busy,
                    enabled: connected,
                    on_reload: move |_| ui.dispatch(UiAction::LoadBackups),
                    on_pick_folder: move |_| ui.dispatch(UiAction::PickRestoreFolder),
                    on_restore: move |dir| ui.dispatch(UiAction::RequestRestore(dir)),
                }
                StatusBar {
                    message: ui.status.message.read().clone(),
                    progress: *ui.packages.progress.read(),
                }
                div { style: "text-align:left; font-size:0.7em; opacity:0.5; letter-spacing:0.5px;",
                    "Built with Rust 🦀 and Dioxus ⚛️ · © {build_year}"
                }
            }
            if let Some(dialog) = front_dialog {
                DialogOverlay {
                    dialog: dialog,
                    queued: queued,
                    on_accept: move |_| ui.dispatch(UiAction::AcceptDialog),
                    on_dismiss: move |_| ui.dispatch(UiAction::DismissDialog),
                }
            }
        }
    }
}
