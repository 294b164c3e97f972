//! Posting messages and naming new channels.
//!
//! Both take the input field's text by `&mut String` and clear it only
//! when something happened, so a rejected submit leaves the draft intact.

use crate::document::Document;
use crate::error::Result;
use crate::paths::{message_path, new_channel_prefix};
use crate::store::DocumentStore;

/// Where a message will land.
#[derive(Clone, Copy, Debug)]
pub struct PostTarget<'a> {
    pub workspace: &'a str,
    pub author: &'a str,
    pub prefix: &'a str,
}

/// Placeholder for the message input under `prefix`.
pub fn poster_placeholder(prefix: &str) -> String {
    format!("Send a message to {prefix}")
}

/// Placeholder for the new-channel input.
pub const NEW_PATH_PLACEHOLDER: &str = "name your new path, then send a message to create it";

/// Shown instead of the message input when nobody is signed in.
pub const POSTER_SIGN_IN_PROMPT: &str = "Sign in to send a message.";

/// Shown instead of the new-channel input when nobody is signed in.
pub const NEW_PATH_SIGN_IN_PROMPT: &str = "Sign in to make a new path.";

/// Write the trimmed `input` as a new message and clear `input`.
///
/// Whitespace-only input is ignored and returns `Ok(None)`. On a store
/// error the input is kept so the user can retry.
pub fn submit_message(
    store: &dyn DocumentStore,
    target: PostTarget<'_>,
    input: &mut String,
    created_millis: u64,
) -> Result<Option<Document>> {
    let content = input.trim();
    if content.is_empty() {
        return Ok(None);
    }
    let path = message_path(target.prefix, target.author, created_millis);
    let doc = store.set_document(target.workspace, target.author, &path, content)?;
    tracing::info!(
        workspace = target.workspace,
        path = %doc.path,
        "message posted"
    );
    input.clear();
    Ok(Some(doc))
}

/// Turn `input` into a new channel prefix and clear it.
///
/// Nothing is written; the channel appears once a message is posted under it.
pub fn submit_new_channel(schema_version: &str, input: &mut String) -> Option<String> {
    let prefix = new_channel_prefix(schema_version, input)?;
    tracing::debug!(%prefix, "new channel selected");
    input.clear();
    Some(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LobbyError;
    use crate::store::{MemoryStore, Query};

    const WS: &str = "+cozy.a";

    fn target<'a>(author: &'a str, prefix: &'a str) -> PostTarget<'a> {
        PostTarget {
            workspace: WS,
            author,
            prefix,
        }
    }

    #[test]
    fn test_post_scenario() {
        let store = MemoryStore::new();
        let mut input = "hello".to_string();
        let doc = submit_message(&store, target("abc", "/lobby/"), &mut input, 1000)
            .unwrap()
            .unwrap();
        assert_eq!(doc.path, "/lobby/~abc/1000.txt");
        assert_eq!(doc.content, "hello");
        assert!(input.is_empty());
    }

    #[test]
    fn test_post_trims_content() {
        let store = MemoryStore::new();
        let mut input = "  hi there \n".to_string();
        let doc = submit_message(&store, target("abc", "/lobby/"), &mut input, 5)
            .unwrap()
            .unwrap();
        assert_eq!(doc.content, "hi there");
    }

    #[test]
    fn test_blank_post_is_ignored() {
        let store = MemoryStore::new();
        store.add_workspace(WS);
        for blank in ["", "   ", "\n\t "] {
            let mut input = blank.to_string();
            let result = submit_message(&store, target("abc", "/lobby/"), &mut input, 1).unwrap();
            assert!(result.is_none());
            assert_eq!(input, blank);
        }
        assert!(store.query_documents(WS, &Query::default()).unwrap().is_empty());
    }

    #[test]
    fn test_post_creates_exactly_one_document() {
        let store = MemoryStore::new();
        let mut input = "first in movies".to_string();
        submit_message(&store, target("abc", "/chat-v1/movies/"), &mut input, 77).unwrap();

        let docs = store.query_documents(WS, &Query::default()).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].path.starts_with("/chat-v1/movies/"));
        assert!(docs[0].path.ends_with(".txt"));
    }

    #[test]
    fn test_failed_post_keeps_input() {
        let store = MemoryStore::new();
        let mut input = "hello".to_string();
        let err = submit_message(&store, target("a b", "/lobby/"), &mut input, 1).unwrap_err();
        assert!(matches!(err, LobbyError::InvalidPath { .. }));
        assert_eq!(input, "hello");
    }

    #[test]
    fn test_new_channel_scenario() {
        let store = MemoryStore::new();
        store.add_workspace(WS);
        let mut input = "movies".to_string();
        let prefix = submit_new_channel("v1", &mut input);
        assert_eq!(prefix.as_deref(), Some("/chat-v1/movies/"));
        assert!(input.is_empty());
        assert!(store.query_documents(WS, &Query::default()).unwrap().is_empty());
    }

    #[test]
    fn test_new_channel_blank_keeps_input() {
        let mut input = "  ".to_string();
        assert_eq!(submit_new_channel("v1", &mut input), None);
        assert_eq!(input, "  ");
    }

    #[test]
    fn test_placeholder_names_prefix() {
        assert_eq!(poster_placeholder("/lobby/"), "Send a message to /lobby/");
    }
}
