//! Display rows for documents.
//!
//! Provides the view model for one message plus the pure pieces it is
//! built from: author color bucket, author name and timestamp title.

use chrono::{DateTime, Local, TimeZone};

use crate::document::{author_label, Document};

/// One of six fixed color buckets for an author.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthorColor {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl AuthorColor {
    /// All buckets in table order.
    pub const ALL: [AuthorColor; 6] = [
        AuthorColor::A,
        AuthorColor::B,
        AuthorColor::C,
        AuthorColor::D,
        AuthorColor::E,
        AuthorColor::F,
    ];

    /// Deterministic bucket for an author address.
    ///
    /// Stable across sessions and machines. Distinct authors may share a bucket.
    pub fn for_author(author: &str) -> Self {
        let hash = blake3::hash(author.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        let idx = u64::from_le_bytes(head) % Self::ALL.len() as u64;
        Self::ALL[idx as usize]
    }

    /// CSS class for this bucket.
    pub fn css_class(self) -> &'static str {
        match self {
            AuthorColor::A => "author-a",
            AuthorColor::B => "author-b",
            AuthorColor::C => "author-c",
            AuthorColor::D => "author-d",
            AuthorColor::E => "author-e",
            AuthorColor::F => "author-f",
        }
    }
}

/// CSS class for a channel button. Only the active prefix is highlighted.
pub fn path_class(path: &str, active_prefix: &str) -> &'static str {
    if path == active_prefix {
        "path active"
    } else {
        "path"
    }
}

/// Format a microsecond timestamp as `D/M/YYYY HH:MM` in local time.
pub fn format_timestamp(micros: u64) -> String {
    format_timestamp_in(micros, &Local)
}

/// Format a microsecond timestamp as `D/M/YYYY HH:MM` in `tz`.
///
/// Out-of-range timestamps format as an empty string.
pub fn format_timestamp_in<Tz: TimeZone>(micros: u64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Ok(micros) = i64::try_from(micros) else {
        return String::new();
    };
    DateTime::from_timestamp_micros(micros)
        .map(|dt| dt.with_timezone(tz).format("%-d/%-m/%Y %H:%M").to_string())
        .unwrap_or_default()
}

/// View model for a single message row.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    /// Document path, used as the row key.
    pub path: String,
    /// Raw author address, shown as the name's hover title.
    pub author: String,
    /// Display name override, or the default author label.
    pub author_name: String,
    /// Whether `author_name` came from a display-name document.
    pub has_display_name: bool,
    /// CSS class of the author's color bucket.
    pub color_class: &'static str,
    /// Message text.
    pub content: String,
    /// Formatted write time, shown as the content's hover title.
    pub timestamp_title: String,
}

impl MessageView {
    /// Build a row from a document and the author's display-name document, if any.
    pub fn new(doc: &Document, display_name: Option<&Document>) -> Self {
        Self::with_timestamp(doc, display_name, format_timestamp(doc.timestamp))
    }

    fn with_timestamp(
        doc: &Document,
        display_name: Option<&Document>,
        timestamp_title: String,
    ) -> Self {
        let override_name = display_name
            .map(|d| d.content.trim())
            .filter(|name| !name.is_empty());
        let (author_name, has_display_name) = match override_name {
            Some(name) => (name.to_string(), true),
            None => (author_label(&doc.author), false),
        };
        Self {
            path: doc.path.clone(),
            author: doc.author.clone(),
            author_name,
            has_display_name,
            color_class: AuthorColor::for_author(&doc.author).css_class(),
            content: doc.content.clone(),
            timestamp_title,
        }
    }

    /// The row as plain text: `<name>: <content>`.
    pub fn line(&self) -> String {
        format!("{}: {}", self.author_name, self.content)
    }
}
