//! Top bar for choosing the current workspace and author.

use dioxus::prelude::*;

use crate::document::author_label;
use crate::state::{normalize_author, normalize_workspace, SessionContext};

/// Workspace picker and sign-in controls.
#[component]
pub fn SessionBar() -> Element {
    let mut session = use_context::<SessionContext>();
    let mut known = use_signal(|| session.store.peek().store.workspaces());
    let mut new_workspace = use_signal(String::new);
    let mut author_input = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);

    let current_ws = session.current_workspace.read().clone();
    let current_author = session.current_author.read().clone();
    let author_name = current_author.as_deref().map(author_label).unwrap_or_default();
    let workspaces = known.read().clone();

    let mut add_workspace = move || {
        let Some(address) = normalize_workspace(&new_workspace.read()) else {
            notice.set(Some("Workspace addresses look like +name.key".to_string()));
            return;
        };
        let store = session.store.read().clone();
        store.store.add_workspace(&address);
        known.set(store.store.workspaces());
        session.current_workspace.set(Some(address));
        new_workspace.set(String::new());
        notice.set(None);
    };

    let mut sign_in = move || {
        let Some(address) = normalize_author(&author_input.read()) else {
            notice.set(Some("Author addresses look like @name.key".to_string()));
            return;
        };
        tracing::info!(author = %address, "signed in");
        session.current_author.set(Some(address));
        author_input.set(String::new());
        notice.set(None);
    };

    rsx! {
        div { class: "session-bar",
            div { class: "session-workspace",
                select {
                    value: current_ws.clone().unwrap_or_default(),
                    onchange: move |evt| {
                        let value = evt.value();
                        session.current_workspace.set(if value.is_empty() { None } else { Some(value) });
                    },
                    option { value: "", "(no workspace)" }
                    for ws in workspaces {
                        option {
                            key: "{ws}",
                            value: "{ws}",
                            selected: current_ws.as_deref() == Some(ws.as_str()),
                            "{ws}"
                        }
                    }
                }
                input {
                    placeholder: "+workspace.key",
                    value: "{new_workspace}",
                    oninput: move |evt| new_workspace.set(evt.value()),
                }
                button { onclick: move |_| add_workspace(), "Add" }
            }
            div { class: "session-author",
                if let Some(author) = current_author {
                    span { class: "session-author-name", title: "{author}", "{author_name}" }
                    button {
                        onclick: move |_| {
                            tracing::info!("signed out");
                            session.current_author.set(None);
                        },
                        "Sign out"
                    }
                } else {
                    input {
                        placeholder: "@name.key",
                        value: "{author_input}",
                        oninput: move |evt| author_input.set(evt.value()),
                    }
                    button { onclick: move |_| sign_in(), "Sign in" }
                }
            }
            if let Some(ref msg) = *notice.read() {
                div { class: "session-notice", "{msg}" }
            }
        }
    }
}
