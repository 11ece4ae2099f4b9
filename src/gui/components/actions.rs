// gui/components/actions.rs
use dioxus::prelude::*;

const BUTTON: &str = "color:white; padding:10px 18px; border:none; border-radius:6px; font-size:0.95em; font-weight:bold; min-width:140px;";

#[derive(Props, PartialEq, Clone)]
pub struct ActionsProps {
    /// A device is attached
    pub enabled: bool,
    pub busy: bool,
    pub listing: bool,
    pub selected_count: usize,
    pub backup_enabled: bool,
    pub on_list: EventHandler<MouseEvent>,
    pub on_uninstall: EventHandler<MouseEvent>,
    pub on_reboot: EventHandler<MouseEvent>,
    pub on_backup_toggle: EventHandler<bool>,
}

#[component]
pub fn Actions(props: ActionsProps) -> Element {
    let disabled = !props.enabled || props.busy;
    let cursor = if disabled { "cursor:not-allowed; opacity:0.5;" } else { "cursor:pointer;" };
    let list_bg = if props.listing { "background:#ff6b35;" } else { "background:#0d47a1;" };
    rsx! {
        div { style: "background:#252526; padding:12px; border-radius:8px; border:1px solid #3c3c3c; display:flex; flex-direction:column; gap:10px;",
            div { style: "display:flex; gap:10px; flex-wrap:wrap;",
                button { style: "{BUTTON} {list_bg} {cursor}", disabled: disabled,
                    onclick: move |e| props.on_list.call(e),
                    if props.listing { "📦 Scanning..." } else { "📦 Scan Packages" }
                }
                button { style: "{BUTTON} background:#c62828; {cursor}", disabled: disabled,
                    onclick: move |e| props.on_uninstall.call(e),
                    "🗑️ Uninstall Selected ({props.selected_count})"
                }
                button { style: "{BUTTON} background:#6a1b9a; {cursor}", disabled: disabled,
                    onclick: move |e| props.on_reboot.call(e),
                    "🔁 Reboot Device"
                }
            }
            div { style: "display:flex; align-items:center; gap:8px;",
                input {
                    r#type: "checkbox",
                    id: "backup-checkbox",
                    checked: props.backup_enabled,
                    onchange: move |evt| {
                        let checked = evt.value().parse().unwrap_or(false);
                        props.on_backup_toggle.call(checked);
                    },
                    style: "width:16px; height:16px; cursor:pointer;"
                }
                label { r#for: "backup-checkbox", style: "font-size:0.85em; cursor:pointer; user-select:none;", "💾 Back up APKs before uninstall" }
            }
        }
    }
}
