//! Root app component and the embeddable session shell.

use dioxus::prelude::*;

use crate::bridge::LobbyBoot;
use crate::state::SessionContext;

/// Root application component. Expects a [`LobbyBoot`] in launch context.
#[component]
pub fn App() -> Element {
    let boot = use_context::<LobbyBoot>();
    rsx! {
        LobbyShell { boot }
    }
}

/// Session bar plus one lobby, sharing a session context.
///
/// Hosts that already have a store can mount this directly.
#[component]
pub fn LobbyShell(boot: LobbyBoot) -> Element {
    let LobbyBoot { config, store } = boot;
    let workspace = config.workspace.clone();
    let author = config.author.clone();

    use_context_provider(|| SessionContext {
        store: Signal::new(store),
        config: Signal::new(config),
        current_workspace: Signal::new(workspace),
        current_author: Signal::new(author),
    });

    rsx! {
        div { id: "cozylobby-shell",
            super::session_bar::SessionBar {}
            super::lobby::CozyLobby {}
        }
    }
}
