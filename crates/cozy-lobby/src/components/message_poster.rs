//! Message compose bar for the active prefix.

use dioxus::prelude::*;

use crate::document::now_millis;
use crate::poster::{poster_placeholder, submit_message, PostTarget, POSTER_SIGN_IN_PROMPT};
use crate::state::{Composer, LobbyContext, SessionContext};

/// Compose bar. Shows a sign-in prompt instead when nobody is signed in.
#[component]
pub fn MessagePoster() -> Element {
    let session = use_context::<SessionContext>();
    let lobby = use_context::<LobbyContext>();
    let mut text = use_signal(String::new);
    let send_error = use_signal(|| None::<String>);

    let composer = Composer::for_author(session.current_author.read().as_deref(), POSTER_SIGN_IN_PROMPT);
    if let Composer::SignInPrompt(prompt) = composer {
        return rsx! {
            div { class: "sign-in-prompt", "{prompt}" }
        };
    }

    let placeholder = poster_placeholder(&lobby.active_prefix.read());

    rsx! {
        div { id: "posting-input",
            input {
                placeholder: "{placeholder}",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Enter {
                        evt.prevent_default();
                        send(session, lobby, text, send_error);
                    }
                },
            }
            button {
                class: "send-button",
                onclick: move |_| send(session, lobby, text, send_error),
                "Send"
            }
            if let Some(ref err) = *send_error.read() {
                div { class: "post-error", "{err}" }
            }
        }
    }
}

fn send(
    session: SessionContext,
    lobby: LobbyContext,
    mut text: Signal<String>,
    mut send_error: Signal<Option<String>>,
) {
    let (Some(workspace), Some(author)) = (
        session.current_workspace.read().clone(),
        session.current_author.read().clone(),
    ) else {
        return;
    };
    let prefix = lobby.active_prefix.read().clone();
    let store = session.store.read().clone();

    let mut draft = text.read().clone();
    let target = PostTarget {
        workspace: &workspace,
        author: &author,
        prefix: &prefix,
    };
    match submit_message(store.store.as_ref(), target, &mut draft, now_millis()) {
        Ok(Some(_)) => {
            text.set(draft);
            send_error.set(None);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(%workspace, %prefix, error = %e, "failed to post message");
            send_error.set(Some(format!("Send failed: {}", e)));
        }
    }
}
