// gui/mod.rs
// GUI module root for android-debloater

pub mod controller;
mod components {
    pub mod actions;
    pub mod backups_panel;
    pub mod device_panel;
    pub mod dialog;
    pub mod header;
    pub mod package_list;
    pub mod status_bar;
}
pub mod dioxus_app; // main app
pub mod hooks;
