//! UI components for the lobby.

pub mod app;
pub mod lobby;
pub mod session_bar;
pub mod path_list;
pub mod new_path;
pub mod message_list;
pub mod message_row;
pub mod message_poster;
