// gui/components/device_panel.rs
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct DevicePanelProps {
    pub lines: Vec<String>,
    pub connected: bool,
    pub has_error: bool,
    pub busy: bool,
    pub on_refresh: EventHandler<MouseEvent>,
}

#[component]
pub fn DevicePanel(props: DevicePanelProps) -> Element {
    let (badge, badge_style) = if props.has_error {
        ("Error", "background:#5a1f1f; color:#ff6262; border:1px solid #ff6262;")
    } else if props.connected {
        ("Connected", "background:#1f5130; color:#48ff9b; border:1px solid #48ff9b;")
    } else {
        ("No device", "background:#5a4b1f; color:#ffd857; border:1px solid #ffd857;")
    };
    rsx! {
        div { style: "background:#252526; padding:12px; border-radius:8px; border:1px solid #3c3c3c;",
            div { style: "display:flex; align-items:center; gap:8px; margin-bottom:8px;",
                h2 { style: "margin:0; font-size:0.95em; flex:1;", "📋 Connected Devices" }
                span { style: "{badge_style} padding:3px 10px; border-radius:16px; font-size:0.75em; font-weight:600;", "{badge}" }
                button { style: "background:#0d47a1; color:#fff; border:none; padding:5px 10px; border-radius:5px; font-size:0.8em; cursor:pointer;",
                    disabled: props.busy,
                    onclick: move |e| props.on_refresh.call(e),
                    "🔍 Refresh"
                }
            }
            div { style: "background:#1e1e1e; border:1px solid #3c3c3c; border-radius:5px; padding:6px 10px; min-height:40px; font-family:monospace; font-size:0.85em;",
                for (i, line) in props.lines.iter().enumerate() {
                    div { key: "{i}", "{line}" }
                }
            }
        }
    }
}
