// gui/components/header.rs
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct HeaderProps {
    pub version: String,
    pub checking: bool,
    pub on_check_updates: EventHandler<MouseEvent>,
}

#[component]
pub fn Header(props: HeaderProps) -> Element {
    let button_style = if props.checking {
        "background:#2d2d2d; color:#888; border:1px solid #3c3c3c; padding:5px 10px; border-radius:5px; font-size:0.75em; cursor:wait;"
    } else {
        "background:#0d47a1; color:#fff; border:1px solid #1565c0; padding:5px 10px; border-radius:5px; font-size:0.75em; cursor:pointer; font-weight:600;"
    };
    rsx! {
        div { style: "background:#252526; padding:8px 12px; border-radius:8px; display:flex; align-items:center; gap:10px; border:1px solid #3c3c3c;",
            h1 { style: "font-size:1.1em; margin:0; font-weight:600; flex:1;", "📱 Android Debloater" }
            span { style: "font-size:0.75em; opacity:0.6;", "v{props.version}" }
            button { style: "{button_style}", disabled: props.checking,
                onclick: move |e| props.on_check_updates.call(e),
                if props.checking { "⏳ Checking..." } else { "🔄 Check for Updates" }
            }
        }
    }
}
