//! Form for naming a new channel.

use dioxus::prelude::*;

use crate::poster::{submit_new_channel, NEW_PATH_PLACEHOLDER, NEW_PATH_SIGN_IN_PROMPT};
use crate::state::{Composer, LobbyContext, SessionContext};

/// New channel form. Selecting a name switches the lobby to it; the channel
/// shows up in the path list once the first message lands there.
#[component]
pub fn NewPath() -> Element {
    let session = use_context::<SessionContext>();
    let lobby = use_context::<LobbyContext>();
    let mut name = use_signal(String::new);

    let composer = Composer::for_author(session.current_author.read().as_deref(), NEW_PATH_SIGN_IN_PROMPT);
    if let Composer::SignInPrompt(prompt) = composer {
        return rsx! {
            div { class: "sign-in-prompt", "{prompt}" }
        };
    }

    rsx! {
        div { id: "new-path-input",
            input {
                placeholder: NEW_PATH_PLACEHOLDER,
                value: "{name}",
                oninput: move |evt| name.set(evt.value()),
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Enter {
                        evt.prevent_default();
                        create(session, lobby, name);
                    }
                },
            }
            button {
                onclick: move |_| create(session, lobby, name),
                "Create"
            }
        }
    }
}

fn create(session: SessionContext, mut lobby: LobbyContext, mut name: Signal<String>) {
    let schema = session.config.read().schema_version.clone();
    let mut draft = name.read().clone();
    if let Some(prefix) = submit_new_channel(&schema, &mut draft) {
        lobby.active_prefix.set(prefix);
        name.set(draft);
    }
}
