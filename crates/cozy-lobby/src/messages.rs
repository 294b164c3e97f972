//! Message list ordering, loading and scroll bookkeeping.

use std::collections::HashMap;

use crate::document::{display_name_path, Document};
use crate::error::Result;
use crate::render::MessageView;
use crate::store::{DocumentStore, Query};

/// Documents with content, oldest first.
///
/// Ordering is by timestamp only. The sort is stable, so equal timestamps
/// keep the order the store returned them in; peers with skewed clocks can
/// still interleave, which is accepted.
pub fn visible_messages(docs: impl IntoIterator<Item = Document>) -> Vec<Document> {
    let mut docs: Vec<Document> = docs.into_iter().filter(Document::has_content).collect();
    docs.sort_by_key(|doc| doc.timestamp);
    docs
}

/// What the message container's scroll position depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollKey {
    pub workspace: String,
    pub prefix: String,
    /// Path of the newest message, if any.
    pub last_path: Option<String>,
}

impl ScrollKey {
    /// Key for an ordered message list shown under `prefix` of `workspace`.
    pub fn new(workspace: &str, prefix: &str, ordered: &[Document]) -> Self {
        Self {
            workspace: workspace.to_string(),
            prefix: prefix.to_string(),
            last_path: ordered.last().map(|doc| doc.path.clone()),
        }
    }
}

/// Decides when to scroll the message list to the bottom.
///
/// Fires only when the [`ScrollKey`] changes, so unrelated re-renders leave
/// a user's scroll position alone.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    last: Option<ScrollKey>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`; returns `true` when the list should scroll.
    pub fn observe(&mut self, key: ScrollKey) -> bool {
        if self.last.as_ref() == Some(&key) {
            return false;
        }
        self.last = Some(key);
        true
    }
}

/// Rows for one prefix of one workspace, ready to render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageFeed {
    pub workspace: String,
    pub prefix: String,
    pub rows: Vec<MessageView>,
    pub scroll_key: Option<ScrollKey>,
}

impl MessageFeed {
    /// Whether this feed was loaded for `workspace` and `prefix`.
    pub fn is_for(&self, workspace: &str, prefix: &str) -> bool {
        self.workspace == workspace && self.prefix == prefix
    }

    /// Rows to render for `workspace` and `prefix`. A feed still loaded for
    /// another selection yields nothing.
    pub fn rows_for(&self, workspace: &str, prefix: &str) -> &[MessageView] {
        if self.is_for(workspace, prefix) {
            &self.rows
        } else {
            &[]
        }
    }
}

/// Query, order and format the messages under `prefix`.
///
/// Display-name documents are looked up once per distinct author.
pub fn load_feed(store: &dyn DocumentStore, workspace: &str, prefix: &str) -> Result<MessageFeed> {
    let ordered = visible_messages(store.query_documents(workspace, &Query::under(prefix))?);

    let mut names: HashMap<&str, Option<Document>> = HashMap::new();
    for doc in &ordered {
        if !names.contains_key(doc.author.as_str()) {
            let name = store
                .get_document(workspace, &display_name_path(&doc.author))?
                .filter(Document::has_content);
            names.insert(doc.author.as_str(), name);
        }
    }

    let rows = ordered
        .iter()
        .map(|doc| {
            let name = names.get(doc.author.as_str()).and_then(Option::as_ref);
            MessageView::new(doc, name)
        })
        .collect();

    Ok(MessageFeed {
        workspace: workspace.to_string(),
        prefix: prefix.to_string(),
        rows,
        scroll_key: Some(ScrollKey::new(workspace, prefix, &ordered)),
    })
}
