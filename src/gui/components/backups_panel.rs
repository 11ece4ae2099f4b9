// gui/components/backups_panel.rs
use crate::packages::BackupEntry;
use dioxus::prelude::*;
use std::path::PathBuf;

#[derive(Props, PartialEq, Clone)]
pub struct BackupsPanelProps {
    pub entries: Vec<BackupEntry>,
    pub root: String,
    pub busy: bool,
    pub enabled: bool,
    pub on_reload: EventHandler<MouseEvent>,
    pub on_pick_folder: EventHandler<MouseEvent>,
    pub on_restore: EventHandler<PathBuf>,
}

#[component]
pub fn BackupsPanel(props: BackupsPanelProps) -> Element {
    let restore_disabled = props.busy || !props.enabled;
    rsx! {
        div { style: "background:#252526; padding:12px; border-radius:8px; border:1px solid #3c3c3c;",
            div { style: "display:flex; align-items:center; gap:8px; margin-bottom:6px;",
                h2 { style: "margin:0; font-size:0.95em; flex:1;", "💾 Backups" }
                button { style: "background:#2d2d2d; color:#fff; border:1px solid #3c3c3c; padding:4px 10px; border-radius:5px; font-size:0.75em; cursor:pointer;",
                    onclick: move |e| props.on_reload.call(e),
                    "↻ Reload"
                }
                button { style: "background:#2d2d2d; color:#fff; border:1px solid #3c3c3c; padding:4px 10px; border-radius:5px; font-size:0.75em; cursor:pointer;",
                    disabled: restore_disabled,
                    onclick: move |e| props.on_pick_folder.call(e),
                    "📂 Pick Folder..."
                }
            }
            div { style: "font-size:0.7em; opacity:0.5; margin-bottom:6px;", "{props.root}" }
            if props.entries.is_empty() {
                div { style: "font-size:0.8em; opacity:0.5;", "No backups yet" }
            }
            for entry in props.entries.iter().cloned() {
                BackupRow {
                    key: "{entry.package}-{entry.timestamp}",
                    entry: entry.clone(),
                    disabled: restore_disabled,
                    on_restore: props.on_restore,
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct BackupRowProps {
    entry: BackupEntry,
    disabled: bool,
    on_restore: EventHandler<PathBuf>,
}

#[component]
fn BackupRow(props: BackupRowProps) -> Element {
    let dir = props.entry.dir.clone();
    let created = props.entry.created_label();
    rsx! {
        div { style: "display:flex; align-items:center; gap:8px; padding:3px 0; font-size:0.8em;",
            span { style: "flex:1; font-family:monospace;", "{props.entry.package}" }
            span { style: "opacity:0.5;", "{created}" }
            button { style: "background:#0d47a1; color:#fff; border:none; padding:3px 10px; border-radius:4px; font-size:0.9em; cursor:pointer;",
                disabled: props.disabled,
                onclick: move |_| props.on_restore.call(dir.clone()),
                "Restore"
            }
        }
    }
}
