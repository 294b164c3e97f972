//! Documents as seen by the lobby.
//!
//! A document is owned by the store; the lobby only reads snapshots and
//! asks the store to write new ones. Paths follow the convention
//! `/<topic segments>/~<author address>/<filename>`.

use serde::{Deserialize, Serialize};

/// Author address, e.g. `@suzy.bjzee56v2hd6mv5r5ar3xqg3x3oyugf7fejpxnvgquxcubov4rntq`.
pub type AuthorAddress = String;

/// Workspace address, e.g. `+gardening.bxxxx`.
pub type WorkspaceAddress = String;

/// Marker that introduces the author segment of a path.
pub const AUTHOR_MARKER: char = '~';

/// Sigil that starts an author address.
pub const ADDRESS_SIGIL: char = '@';

/// A snapshot of one stored document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Full path, including the `~author` segment.
    pub path: String,
    /// Address of the author who wrote this version.
    pub author: AuthorAddress,
    /// Text content. Empty content marks a deleted document.
    pub content: String,
    /// Write time in microseconds since the Unix epoch.
    pub timestamp: u64,
}

impl Document {
    /// Whether this document still carries content.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Path of the display-name override document for an author.
pub fn display_name_path(author: &str) -> String {
    format!("/about/{AUTHOR_MARKER}{author}/displayName.txt")
}

/// The author address embedded in a path's `~` segment, if any.
pub fn path_owner(path: &str) -> Option<&str> {
    let start = path.find(AUTHOR_MARKER)? + AUTHOR_MARKER.len_utf8();
    let rest = &path[start..];
    let end = rest.find('/').unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Default label for an author without a display-name override.
///
/// `@suzy.bxxxx` renders as `@suzy`; anything else is shortened.
pub fn author_label(address: &str) -> String {
    if address.starts_with(ADDRESS_SIGIL) {
        if let Some((shortname, _)) = address.split_once('.') {
            return shortname.to_string();
        }
    }
    short_id(address)
}

/// Shorten an id for display.
pub fn short_id(id: &str) -> String {
    match id.char_indices().nth(8) {
        Some((idx, _)) => format!("{}...", &id[..idx]),
        None => id.to_string(),
    }
}

/// Current wall-clock time in microseconds since the Unix epoch.
pub fn now_micros() -> u64 {
    chrono::Utc::now().timestamp_micros().max(0) as u64
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_path() {
        assert_eq!(
            display_name_path("@suzy.bxxx"),
            "/about/~@suzy.bxxx/displayName.txt"
        );
    }

    #[test]
    fn test_path_owner() {
        assert_eq!(path_owner("/lobby/~@suzy.bxxx/1.txt"), Some("@suzy.bxxx"));
        assert_eq!(path_owner("/lobby/~abc"), Some("abc"));
        assert_eq!(path_owner("/lobby/1.txt"), None);
    }

    #[test]
    fn test_author_label() {
        assert_eq!(author_label("@suzy.bjzee56v2hd6mv5r5ar3"), "@suzy");
        assert_eq!(author_label("abc"), "abc");
        assert_eq!(author_label("abcdefghijkl"), "abcdefgh...");
    }

    #[test]
    fn test_short_id_multibyte() {
        assert_eq!(short_id("ééééééééé"), "éééééééé...");
    }

    #[test]
    fn test_has_content() {
        let mut doc = Document {
            path: "/lobby/~abc/1.txt".to_string(),
            author: "abc".to_string(),
            content: "hi".to_string(),
            timestamp: 1,
        };
        assert!(doc.has_content());
        doc.content.clear();
        assert!(!doc.has_content());
    }
}
