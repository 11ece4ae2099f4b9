use android_debloater::args::Args;
use android_debloater::gui::dioxus_app::run_gui;
use android_debloater::logging::{LogConfig, init_logging};

fn main() {
    let Some(args) = Args::parse() else {
        return;
    };

    let log_guard = init_logging(&LogConfig::new(args.debug_mode));
    log::info!(
        "Starting Android Debloater v{} (debug={}, backup={})",
        env!("APP_VERSION_DISPLAY"),
        args.debug_mode,
        args.backup_before_uninstall
    );
    match log_guard.path() {
        Some(path) => log::info!("Logging to {}", path.display()),
        None => log::warn!("No log file; logging to stderr"),
    }

    run_gui(args);
    log::info!("Application closed");
    drop(log_guard);
}
