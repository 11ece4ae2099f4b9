// gui/components/status_bar.rs
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct StatusBarProps {
    pub message: String,
    /// (done, total) while an uninstall batch runs
    pub progress: Option<(usize, usize)>,
}

#[component]
pub fn StatusBar(props: StatusBarProps) -> Element {
    rsx! {
        div { style: "background:#252526; padding:8px 12px; border-radius:8px; border:1px solid #3c3c3c; display:flex; flex-direction:column; gap:6px;",
            if let Some((done, total)) = props.progress {
                div { style: "display:flex; align-items:center; gap:8px; font-size:0.75em;",
                    progress { style: "flex:1; accent-color:#0d47a1;", max: "{total}", value: "{done}" }
                    span { "{done}/{total}" }
                }
            }
            if !props.message.is_empty() { div { style: "font-size:0.8em; opacity:0.85;", "{props.message}" } }
        }
    }
}
