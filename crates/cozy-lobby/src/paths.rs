//! Channel paths: deriving folder prefixes from document paths and
//! building the paths new channels and messages live at.
//!
//! A channel has no document of its own. It exists once something has
//! been written under it, so the list of channels is recomputed from the
//! paths the store already holds.

use std::collections::HashSet;

use crate::document::{ADDRESS_SIGIL, AUTHOR_MARKER};
use crate::error::Result;
use crate::store::{DocumentStore, Query};

/// Roots a derived prefix must start with to be offered as a channel.
pub const DEFAULT_ALLOWED_ROOTS: &[&str] = &["/lobby", "/chat"];

/// The enclosing folder of a document path, ending with `/`.
///
/// Cuts at the first identity marker (`@` or `~`) and keeps everything up
/// to the last `/` before it. Returns `None` for paths without a `~`
/// segment, paths not starting with `/`, or paths whose folder would be
/// just the root.
pub fn folder_of(path: &str) -> Option<&str> {
    if !path.starts_with('/') {
        return None;
    }
    let marker = path.find(AUTHOR_MARKER)?;
    let cut = match path.find(ADDRESS_SIGIL) {
        Some(at) if at < marker => at,
        _ => marker,
    };
    let head = &path[..cut];
    let end = head.rfind('/')? + 1;
    if end <= 1 {
        return None;
    }
    Some(&path[..end])
}

/// Folder prefixes under the allow-listed roots, de-duplicated in first-seen order.
///
/// Malformed paths are skipped.
pub fn derive_prefixes<'a, I, S>(paths: I, allowed_roots: &[S]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut prefixes = Vec::new();
    for path in paths {
        let Some(folder) = folder_of(path) else {
            tracing::trace!(path, "skipping path without a channel folder");
            continue;
        };
        if !allowed_roots.iter().any(|root| folder.starts_with(root.as_ref())) {
            continue;
        }
        if seen.insert(folder) {
            prefixes.push(folder.to_string());
        }
    }
    prefixes
}

/// Channels offered for `workspace`: prefixes of every path with content.
pub fn list_channels<S: AsRef<str>>(
    store: &dyn DocumentStore,
    workspace: &str,
    allowed_roots: &[S],
) -> Result<Vec<String>> {
    let paths = store.query_paths(workspace, &Query::with_content())?;
    Ok(derive_prefixes(paths.iter().map(String::as_str), allowed_roots))
}

/// Everything up to and including the second `/`, with no allow-list.
///
/// Only sees the first topic segment, so `/chat-v1/general/` collapses to
/// `/chat-v1/`, and it offers every root in the workspace.
#[deprecated(note = "use derive_prefixes, which keeps nested channels and applies the allow-list")]
pub fn derive_prefixes_shallow<'a, I>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut prefixes = Vec::new();
    for path in paths {
        let Some(second) = path.match_indices('/').nth(1).map(|(idx, _)| idx) else {
            continue;
        };
        let prefix = &path[..=second];
        if seen.insert(prefix) {
            prefixes.push(prefix.to_string());
        }
    }
    prefixes
}

/// Prefix for a user-named channel: `/chat-<schema>/<name>/`.
///
/// Returns `None` when the trimmed name is empty or contains `/`, `~` or `@`,
/// any of which would stop the channel from being derived back from its
/// message paths.
pub fn new_channel_prefix(schema_version: &str, name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() || name.contains('/') {
        return None;
    }
    let prefix = format!("/chat-{schema_version}/{name}/");
    is_channel_prefix(&prefix).then_some(prefix)
}

/// Whether messages posted under `prefix` are owned by their author and
/// derive back to `prefix`.
pub fn is_channel_prefix(prefix: &str) -> bool {
    prefix.len() > 1
        && prefix.starts_with('/')
        && prefix.ends_with('/')
        && !prefix.contains("//")
        && !prefix.contains([AUTHOR_MARKER, ADDRESS_SIGIL])
        && !prefix.chars().any(char::is_whitespace)
}

/// Path of a new message: `<prefix>~<author>/<millis>.txt`.
pub fn message_path(prefix: &str, author: &str, created_millis: u64) -> String {
    format!("{prefix}{AUTHOR_MARKER}{author}/{created_millis}.txt")
}
