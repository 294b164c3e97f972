//! The lobby root view: onboarding or the channel/message layout.

use dioxus::prelude::*;

use crate::state::{LobbyContext, LobbyPhase, SessionContext};

/// One lobby. Owns its active prefix, so several can be mounted side by side.
#[component]
pub fn CozyLobby() -> Element {
    let session = use_context::<SessionContext>();
    let default_prefix = session.config.read().default_prefix.clone();
    use_context_provider(|| LobbyContext {
        active_prefix: Signal::new(default_prefix),
    });

    let phase = LobbyPhase::from_selection(session.current_workspace.read().as_deref());

    if !phase.mounts_panels() {
        return rsx! {
            div { id: "cozylobby-app",
                div { class: "onboarding",
                    p { "To enter The Cozy Lobby, you must first join and select a workspace." }
                    p { "If you don't know any yet, find a friend who can give you an invitation code." }
                }
            }
        };
    }

    rsx! {
        div { id: "cozylobby-app",
            header {
                aside {
                    p {
                        "Welcome to The Cozy Lobby. You can use it to view any "
                        b { "workspace" }
                        " you know the address of. You might also need to connect to a "
                        b { "pub" }
                        " to get the latest "
                        b { "documents" }
                        " from that workspace. You can get started by adding a workspace in the top bar."
                    }
                }
            }
            div { id: "left-panel",
                section { id: "choose-your-path",
                    super::path_list::PathList {}
                }
                section { id: "new-path",
                    super::new_path::NewPath {}
                }
            }
            section { id: "panel",
                super::message_list::MessageList {}
                super::message_poster::MessagePoster {}
            }
        }
    }
}
