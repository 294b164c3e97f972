//! Lobby state shared through Dioxus context.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::core::Task;
use dioxus::prelude::*;

use crate::bridge::StoreHandle;
use crate::config::LobbyConfig;
use crate::document::{AuthorAddress, WorkspaceAddress, ADDRESS_SIGIL, AUTHOR_MARKER};

/// Root view state, driven by the current workspace selection.
#[derive(Clone, Debug, PartialEq)]
pub enum LobbyPhase {
    /// No workspace selected: onboarding text only, no queries.
    NoWorkspace,
    /// A workspace is selected: channels, messages and poster are mounted.
    WorkspaceActive(WorkspaceAddress),
}

impl LobbyPhase {
    pub fn from_selection(workspace: Option<&str>) -> Self {
        match workspace.map(str::trim) {
            Some(ws) if !ws.is_empty() => LobbyPhase::WorkspaceActive(ws.to_string()),
            _ => LobbyPhase::NoWorkspace,
        }
    }

    /// Whether the channel list, message list and poster are mounted.
    pub fn mounts_panels(&self) -> bool {
        matches!(self, LobbyPhase::WorkspaceActive(_))
    }
}

/// What a compose area (poster or new-path form) renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composer {
    /// Nobody is signed in: show only this prompt and never write.
    SignInPrompt(&'static str),
    /// Show the input form.
    Form,
}

impl Composer {
    pub fn for_author(author: Option<&str>, prompt: &'static str) -> Self {
        match author {
            Some(author) if !author.trim().is_empty() => Composer::Form,
            _ => Composer::SignInPrompt(prompt),
        }
    }
}

/// Ambient session state: the store and who is looking at which workspace.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub store: Signal<StoreHandle>,
    pub config: Signal<LobbyConfig>,
    pub current_workspace: Signal<Option<WorkspaceAddress>>,
    pub current_author: Signal<Option<AuthorAddress>>,
}

/// Per-lobby view state, owned by one `CozyLobby` instance.
#[derive(Clone, Copy)]
pub struct LobbyContext {
    /// The channel being viewed and posted to. Always ends with `/`.
    pub active_prefix: Signal<String>,
}

/// The subscription task a list component is running, if any.
pub type WatcherSlot = Rc<Cell<Option<Task>>>;

/// Cancel the watcher in `slot`. Returns whether one was running.
pub fn cancel_watcher(slot: &WatcherSlot) -> bool {
    match slot.take() {
        Some(task) => {
            task.cancel();
            true
        }
        None => false,
    }
}

/// Validate a typed author address for sign-in.
///
/// The address ends up inside document paths, so `/`, `~` and whitespace are refused.
pub fn normalize_author(input: &str) -> Option<AuthorAddress> {
    let address = input.trim();
    let usable = !address.is_empty()
        && address.starts_with(ADDRESS_SIGIL)
        && !address.contains(['/', AUTHOR_MARKER])
        && !address.chars().any(char::is_whitespace);
    usable.then(|| address.to_string())
}

/// Validate a typed workspace address.
pub fn normalize_workspace(input: &str) -> Option<WorkspaceAddress> {
    let address = input.trim();
    let usable = address.starts_with('+')
        && address.len() > 1
        && !address.chars().any(char::is_whitespace);
    usable.then(|| address.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::{NEW_PATH_SIGN_IN_PROMPT, POSTER_SIGN_IN_PROMPT};

    #[test]
    fn test_phase_from_selection() {
        assert_eq!(LobbyPhase::from_selection(None), LobbyPhase::NoWorkspace);
        assert_eq!(LobbyPhase::from_selection(Some("")), LobbyPhase::NoWorkspace);
        assert_eq!(LobbyPhase::from_selection(Some("  ")), LobbyPhase::NoWorkspace);
        assert_eq!(
            LobbyPhase::from_selection(Some("+cozy.a")),
            LobbyPhase::WorkspaceActive("+cozy.a".to_string())
        );
    }

    #[test]
    fn test_panels_need_a_workspace() {
        assert!(!LobbyPhase::from_selection(None).mounts_panels());
        assert!(!LobbyPhase::from_selection(Some(" ")).mounts_panels());
        assert!(LobbyPhase::from_selection(Some("+cozy.a")).mounts_panels());
    }

    #[test]
    fn test_composer_without_author_is_prompt_only() {
        assert_eq!(
            Composer::for_author(None, POSTER_SIGN_IN_PROMPT),
            Composer::SignInPrompt("Sign in to send a message.")
        );
        assert_eq!(
            Composer::for_author(Some(""), NEW_PATH_SIGN_IN_PROMPT),
            Composer::SignInPrompt("Sign in to make a new path.")
        );
        assert_eq!(
            Composer::for_author(Some("@suzy.bxxx"), POSTER_SIGN_IN_PROMPT),
            Composer::Form
        );
    }

    #[test]
    fn test_cancel_empty_watcher_slot() {
        let slot: WatcherSlot = Rc::new(Cell::new(None));
        assert!(!cancel_watcher(&slot));
        assert!(!cancel_watcher(&slot));
    }

    #[test]
    fn test_normalize_author() {
        assert_eq!(normalize_author(" @suzy.bxxx ").as_deref(), Some("@suzy.bxxx"));
        assert_eq!(normalize_author("suzy"), None);
        assert_eq!(normalize_author("@su zy"), None);
        assert_eq!(normalize_author("@suzy/x"), None);
        assert_eq!(normalize_author("@~suzy"), None);
        assert_eq!(normalize_author(""), None);
    }

    #[test]
    fn test_normalize_workspace() {
        assert_eq!(normalize_workspace("+cozy.a").as_deref(), Some("+cozy.a"));
        assert_eq!(normalize_workspace("+"), None);
        assert_eq!(normalize_workspace("cozy"), None);
        assert_eq!(normalize_workspace("+co zy"), None);
    }
}
