//! Cozy Lobby: a chat-room view over a synced document workspace.
//!
//! Channels are path prefixes such as `/lobby/` or `/chat-v1/movies/`;
//! messages are text documents written under them at
//! `<prefix>~<author>/<millis>.txt`. The document store itself is an
//! external collaborator behind [`store::DocumentStore`].

pub mod bridge;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod messages;
pub mod paths;
pub mod poster;
pub mod render;
pub mod state;
pub mod store;
pub mod stream;

pub use error::{LobbyError, Result};

/// Lobby CSS for embedding in host apps.
pub const LOBBY_CSS: &str = include_str!("style.css");
