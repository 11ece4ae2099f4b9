// gui/components/package_list.rs
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct PackageListProps {
    pub query: String,
    pub count_label: String,
    /// Packages matching the query, in device order
    pub visible: Vec<String>,
    pub selected: Vec<bool>,
    pub on_search: EventHandler<String>,
    pub on_toggle: EventHandler<String>,
    pub on_search_online: EventHandler<String>,
}

#[component]
pub fn PackageList(props: PackageListProps) -> Element {
    rsx! {
        div { style: "background:#252526; padding:12px; border-radius:8px; border:1px solid #3c3c3c; display:flex; flex-direction:column; gap:8px; min-height:0; flex:1;",
            input {
                r#type: "text",
                placeholder: "Search packages...",
                value: "{props.query}",
                oninput: move |evt| props.on_search.call(evt.value()),
                style: "background:#1e1e1e; color:#fff; border:1px solid #3c3c3c; border-radius:5px; padding:6px 10px; font-size:0.9em;"
            }
            div { style: "font-size:0.8em; opacity:0.7;", "{props.count_label}" }
            div { style: "flex:1; overflow:auto; background:#1e1e1e; border:1px solid #3c3c3c; border-radius:5px; min-height:200px;",
                for (i, name) in props.visible.iter().cloned().enumerate() {
                    PackageRow {
                        key: "{i}-{name}",
                        selected: props.selected.get(i).copied().unwrap_or(false),
                        name: name.clone(),
                        on_toggle: props.on_toggle,
                        on_search_online: props.on_search_online,
                    }
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct PackageRowProps {
    name: String,
    selected: bool,
    on_toggle: EventHandler<String>,
    on_search_online: EventHandler<String>,
}

#[component]
fn PackageRow(props: PackageRowProps) -> Element {
    let row_style = if props.selected {
        "background:#0d47a1;"
    } else {
        "background:transparent;"
    };
    let toggle_name = props.name.clone();
    let search_name = props.name.clone();
    rsx! {
        div { style: "{row_style} display:flex; align-items:center; gap:6px; padding:3px 8px; cursor:pointer; font-family:monospace; font-size:0.85em; user-select:none;",
            onclick: move |_| props.on_toggle.call(toggle_name.clone()),
            span { style: "flex:1; overflow:hidden; text-overflow:ellipsis; white-space:nowrap;", "{props.name}" }
            button { style: "background:transparent; border:none; color:#90caf9; cursor:pointer; font-size:0.9em;",
                title: "Search online",
                onclick: move |evt| {
                    evt.stop_propagation();
                    props.on_search_online.call(search_name.clone());
                },
                "🔍"
            }
        }
    }
}
