// gui/components/dialog.rs
// In-window modal for confirmations and notifications
use crate::gui::controller::{Dialog, DialogLevel};
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct DialogOverlayProps {
    pub dialog: Dialog,
    /// Notifications still waiting behind this one
    pub queued: usize,
    pub on_accept: EventHandler<MouseEvent>,
    pub on_dismiss: EventHandler<MouseEvent>,
}

#[component]
pub fn DialogOverlay(props: DialogOverlayProps) -> Element {
    let (icon, accent) = match &props.dialog {
        Dialog::Confirm { .. } => ("❓", "#0d47a1"),
        Dialog::Message { level: DialogLevel::Info, .. } => ("✅", "#2e7d32"),
        Dialog::Message { level: DialogLevel::Warning, .. } => ("⚠️", "#f9a825"),
        Dialog::Message { level: DialogLevel::Error, .. } => ("❌", "#c62828"),
    };
    let title = props.dialog.title().to_string();
    rsx! {
        div { style: "position:fixed; inset:0; background:rgba(0,0,0,0.6); display:flex; align-items:center; justify-content:center; z-index:100;",
            div { style: "background:#252526; border:1px solid {accent}; border-radius:10px; padding:18px 20px; width:80%; max-width:440px; display:flex; flex-direction:column; gap:10px;",
                h3 { style: "margin:0; font-size:1em;", "{icon} {title}" }
                match &props.dialog {
                    Dialog::Confirm { text, detail, .. } => rsx! {
                        p { style: "margin:0; font-size:0.9em;", "{text}" }
                        if !detail.is_empty() { p { style: "margin:0; font-size:0.8em; opacity:0.7;", "{detail}" } }
                        div { style: "display:flex; justify-content:flex-end; gap:8px;",
                            button { style: "background:#2d2d2d; color:#fff; border:1px solid #3c3c3c; padding:6px 16px; border-radius:5px; cursor:pointer;",
                                onclick: move |e| props.on_dismiss.call(e), "No" }
                            button { style: "background:{accent}; color:#fff; border:none; padding:6px 16px; border-radius:5px; cursor:pointer; font-weight:600;",
                                onclick: move |e| props.on_accept.call(e), "Yes" }
                        }
                    },
                    Dialog::Message { text, .. } => rsx! {
                        p { style: "margin:0; font-size:0.9em; white-space:pre-wrap; word-break:break-word;", "{text}" }
                        div { style: "display:flex; justify-content:flex-end; align-items:center; gap:8px;",
                            if props.queued > 0 { span { style: "font-size:0.7em; opacity:0.6;", "{props.queued} more" } }
                            button { style: "background:{accent}; color:#fff; border:none; padding:6px 16px; border-radius:5px; cursor:pointer; font-weight:600;",
                                onclick: move |e| props.on_dismiss.call(e), "OK" }
                        }
                    },
                }
            }
        }
    }
}
