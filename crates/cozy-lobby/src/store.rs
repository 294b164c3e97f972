//! Document store boundary.
//!
//! The lobby never owns documents. Everything it shows comes from a
//! [`DocumentStore`], and everything it posts goes back through one.
//! [`MemoryStore`] is the in-process implementation used by the desktop
//! app and the tests; it enforces path ownership and emits change events
//! but does no persistence or replication.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::document::{path_owner, AuthorAddress, Document, WorkspaceAddress};
use crate::error::{LobbyError, Result};

/// Capacity of the store's change broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Largest timestamp a seed may carry, in microseconds.
pub const MAX_SEED_TIMESTAMP: u64 = i64::MAX as u64;

/// Filter for document and path queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    /// Only match paths starting with this prefix.
    pub path_prefix: Option<String>,
    /// `Some(false)` keeps documents with content, `Some(true)` keeps only
    /// emptied ones, `None` keeps both.
    pub content_is_empty: Option<bool>,
}

impl Query {
    /// Documents with content under `prefix`.
    pub fn under(prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: Some(prefix.into()),
            content_is_empty: Some(false),
        }
    }

    /// Every document with content.
    pub fn with_content() -> Self {
        Self {
            path_prefix: None,
            content_is_empty: Some(false),
        }
    }

    /// Whether `doc` passes this filter.
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(prefix) = &self.path_prefix {
            if !doc.path.starts_with(prefix.as_str()) {
                return false;
            }
        }
        match self.content_is_empty {
            Some(empty) => doc.content.is_empty() == empty,
            None => true,
        }
    }
}

/// Notification that a document was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreEvent {
    pub workspace: WorkspaceAddress,
    pub path: String,
}

/// The query/mutation surface the lobby consumes.
pub trait DocumentStore: Send + Sync + 'static {
    /// Known workspace addresses, sorted.
    fn workspaces(&self) -> Vec<WorkspaceAddress>;

    /// Make a workspace known to the store.
    fn add_workspace(&self, workspace: &str);

    /// Documents in `workspace` matching `query`, in store order.
    fn query_documents(&self, workspace: &str, query: &Query) -> Result<Vec<Document>>;

    /// Paths of the documents in `workspace` matching `query`, in store order.
    fn query_paths(&self, workspace: &str, query: &Query) -> Result<Vec<String>> {
        Ok(self
            .query_documents(workspace, query)?
            .into_iter()
            .map(|doc| doc.path)
            .collect())
    }

    /// The current document at exactly `path`, if any.
    fn get_document(&self, workspace: &str, path: &str) -> Result<Option<Document>>;

    /// Write `content` to `path` as `author`. The store stamps the timestamp.
    fn set_document(
        &self,
        workspace: &str,
        author: &str,
        path: &str,
        content: &str,
    ) -> Result<Document>;

    /// Subscribe to write notifications across all workspaces.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}

/// One document in a seed fixture file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedDocument {
    pub workspace: WorkspaceAddress,
    pub author: AuthorAddress,
    pub path: String,
    pub content: String,
    /// Microsecond timestamp; the store stamps one if absent.
    #[serde(default)]
    pub timestamp: Option<u64>,
}

/// Read a JSON array of [`SeedDocument`]s.
pub fn load_seed_file(path: &Path) -> Result<Vec<SeedDocument>> {
    let raw = std::fs::read_to_string(path)?;
    let docs: Vec<SeedDocument> = serde_json::from_str(&raw)?;
    Ok(docs)
}

#[derive(Default)]
struct WorkspaceDocs {
    docs: Vec<Document>,
    index: HashMap<String, usize>,
}

#[derive(Default)]
struct Inner {
    workspaces: BTreeMap<WorkspaceAddress, WorkspaceDocs>,
    last_timestamp: u64,
}

/// In-memory document store keyed by workspace and path.
///
/// Each path holds its latest write. Timestamps are strictly increasing
/// within one store, so two writes in the same microsecond still order.
pub struct MemoryStore {
    inner: RwLock<Inner>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: RwLock::new(Inner::default()),
            events,
        }
    }

    /// Apply seed documents, returning how many were written.
    pub fn seed(&self, docs: impl IntoIterator<Item = SeedDocument>) -> Result<usize> {
        let mut written = 0;
        for seed in docs {
            if seed.timestamp.is_some_and(|ts| ts > MAX_SEED_TIMESTAMP) {
                return Err(LobbyError::Seed(format!(
                    "{}: timestamp out of range",
                    seed.path
                )));
            }
            self.write(
                &seed.workspace,
                &seed.author,
                &seed.path,
                &seed.content,
                seed.timestamp,
            )
            .map_err(|e| LobbyError::Seed(format!("{}: {}", seed.path, e)))?;
            written += 1;
        }
        info!(written, "seeded memory store");
        Ok(written)
    }

    fn write(
        &self,
        workspace: &str,
        author: &str,
        path: &str,
        content: &str,
        timestamp: Option<u64>,
    ) -> Result<Document> {
        validate_path(path)?;
        if let Some(owner) = path_owner(path) {
            if owner != author {
                return Err(LobbyError::PermissionDenied {
                    author: author.to_string(),
                    path: path.to_string(),
                });
            }
        }

        let doc = {
            let mut inner = self.inner.write();
            let timestamp = match timestamp {
                Some(ts) => ts,
                None => crate::document::now_micros().max(inner.last_timestamp.saturating_add(1)),
            };
            inner.last_timestamp = inner.last_timestamp.max(timestamp);

            let doc = Document {
                path: path.to_string(),
                author: author.to_string(),
                content: content.to_string(),
                timestamp,
            };
            let ws = inner.workspaces.entry(workspace.to_string()).or_default();
            match ws.index.get(path) {
                Some(&idx) => ws.docs[idx] = doc.clone(),
                None => {
                    ws.index.insert(path.to_string(), ws.docs.len());
                    ws.docs.push(doc.clone());
                }
            }
            doc
        };

        debug!(workspace, path, author, timestamp = doc.timestamp, "document written");
        // No subscribers is fine.
        let _ = self.events.send(StoreEvent {
            workspace: workspace.to_string(),
            path: path.to_string(),
        });
        Ok(doc)
    }
}

impl DocumentStore for MemoryStore {
    fn workspaces(&self) -> Vec<WorkspaceAddress> {
        self.inner.read().workspaces.keys().cloned().collect()
    }

    fn add_workspace(&self, workspace: &str) {
        let mut inner = self.inner.write();
        if !inner.workspaces.contains_key(workspace) {
            inner
                .workspaces
                .insert(workspace.to_string(), WorkspaceDocs::default());
            info!(workspace, "workspace added");
        }
    }

    fn query_documents(&self, workspace: &str, query: &Query) -> Result<Vec<Document>> {
        let inner = self.inner.read();
        let ws = inner
            .workspaces
            .get(workspace)
            .ok_or_else(|| LobbyError::WorkspaceNotFound(workspace.to_string()))?;
        Ok(ws.docs.iter().filter(|doc| query.matches(doc)).cloned().collect())
    }

    fn get_document(&self, workspace: &str, path: &str) -> Result<Option<Document>> {
        let inner = self.inner.read();
        let ws = inner
            .workspaces
            .get(workspace)
            .ok_or_else(|| LobbyError::WorkspaceNotFound(workspace.to_string()))?;
        Ok(ws.index.get(path).map(|&idx| ws.docs[idx].clone()))
    }

    fn set_document(
        &self,
        workspace: &str,
        author: &str,
        path: &str,
        content: &str,
    ) -> Result<Document> {
        self.write(workspace, author, path, content, None)
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

fn validate_path(path: &str) -> Result<()> {
    let invalid = |reason: &str| LobbyError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };
    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if path.ends_with('/') {
        return Err(invalid("must not end with '/'"));
    }
    if path.contains("//") {
        return Err(invalid("empty segment"));
    }
    if path.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WS: &str = "+cozy.a";

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();
        let doc = store.set_document(WS, "abc", "/lobby/~abc/1.txt", "hi").unwrap();
        assert_eq!(doc.author, "abc");
        let got = store.get_document(WS, "/lobby/~abc/1.txt").unwrap();
        assert_eq!(got, Some(doc));
        assert_eq!(store.get_document(WS, "/lobby/~abc/2.txt").unwrap(), None);
    }

    #[test]
    fn test_overwrite_keeps_store_order() {
        let store = MemoryStore::new();
        store.set_document(WS, "abc", "/lobby/~abc/1.txt", "one").unwrap();
        store.set_document(WS, "abc", "/lobby/~abc/2.txt", "two").unwrap();
        store.set_document(WS, "abc", "/lobby/~abc/1.txt", "uno").unwrap();

        let docs = store.query_documents(WS, &Query::default()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "uno");
        assert_eq!(docs[1].content, "two");
        assert!(docs[0].timestamp > docs[1].timestamp);
    }

    #[test]
    fn test_query_filters() {
        let store = MemoryStore::new();
        store.set_document(WS, "abc", "/lobby/~abc/1.txt", "hi").unwrap();
        store.set_document(WS, "abc", "/lobby/~abc/2.txt", "").unwrap();
        store.set_document(WS, "xyz", "/chat-v1/g/~xyz/3.txt", "yo").unwrap();

        let lobby = store.query_documents(WS, &Query::under("/lobby/")).unwrap();
        assert_eq!(lobby.len(), 1);
        assert_eq!(lobby[0].content, "hi");

        let paths = store.query_paths(WS, &Query::with_content()).unwrap();
        assert_eq!(paths, vec!["/lobby/~abc/1.txt", "/chat-v1/g/~xyz/3.txt"]);

        let emptied = Query {
            path_prefix: None,
            content_is_empty: Some(true),
        };
        assert_eq!(store.query_paths(WS, &emptied).unwrap(), vec!["/lobby/~abc/2.txt"]);
    }

    #[test]
    fn test_permission_denied_for_foreign_path() {
        let store = MemoryStore::new();
        let err = store
            .set_document(WS, "abc", "/lobby/~xyz/1.txt", "hi")
            .unwrap_err();
        assert!(matches!(err, LobbyError::PermissionDenied { .. }));
    }

    #[test]
    fn test_invalid_paths_rejected() {
        let store = MemoryStore::new();
        for path in ["lobby/~abc/1.txt", "/lobby/~abc/", "/lobby//~abc/1.txt", "/lobby/~abc/a b.txt"] {
            let err = store.set_document(WS, "abc", path, "hi").unwrap_err();
            assert!(matches!(err, LobbyError::InvalidPath { .. }), "{path}");
        }
    }

    #[test]
    fn test_unknown_workspace() {
        let store = MemoryStore::new();
        let err = store.query_documents("+nope.x", &Query::default()).unwrap_err();
        assert!(matches!(err, LobbyError::WorkspaceNotFound(_)));

        store.add_workspace("+nope.x");
        assert!(store.query_documents("+nope.x", &Query::default()).unwrap().is_empty());
        assert_eq!(store.workspaces(), vec!["+nope.x".to_string()]);
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let store = MemoryStore::new();
        let mut last = 0;
        for i in 0..50 {
            let doc = store
                .set_document(WS, "abc", &format!("/lobby/~abc/{i}.txt"), "x")
                .unwrap();
            assert!(doc.timestamp > last);
            last = doc.timestamp;
        }
    }

    #[test]
    fn test_subscribe_sees_writes() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();
        store.set_document(WS, "abc", "/lobby/~abc/1.txt", "hi").unwrap();
        let event = rx.try_recv().unwrap();
        assert_eq!(event.workspace, WS);
        assert_eq!(event.path, "/lobby/~abc/1.txt");
    }

    #[test]
    fn test_seed_with_explicit_timestamps() {
        let store = MemoryStore::new();
        let written = store
            .seed(vec![SeedDocument {
                workspace: WS.to_string(),
                author: "abc".to_string(),
                path: "/lobby/~abc/1.txt".to_string(),
                content: "old".to_string(),
                timestamp: Some(42),
            }])
            .unwrap();
        assert_eq!(written, 1);
        let doc = store.get_document(WS, "/lobby/~abc/1.txt").unwrap().unwrap();
        assert_eq!(doc.timestamp, 42);
    }

    #[test]
    fn test_seed_rejects_foreign_path() {
        let store = MemoryStore::new();
        let err = store
            .seed(vec![SeedDocument {
                workspace: WS.to_string(),
                author: "abc".to_string(),
                path: "/lobby/~xyz/1.txt".to_string(),
                content: "nope".to_string(),
                timestamp: None,
            }])
            .unwrap_err();
        assert!(matches!(err, LobbyError::Seed(_)));
    }

    #[test]
    fn test_seed_rejects_out_of_range_timestamp() {
        let store = MemoryStore::new();
        let err = store
            .seed(vec![SeedDocument {
                workspace: WS.to_string(),
                author: "abc".to_string(),
                path: "/lobby/~abc/1.txt".to_string(),
                content: "far future".to_string(),
                timestamp: Some(u64::MAX),
            }])
            .unwrap_err();
        assert!(matches!(err, LobbyError::Seed(_)));
        assert!(store.workspaces().is_empty());
    }

    #[test]
    fn test_writes_after_max_seed_timestamp_still_increase() {
        let store = MemoryStore::new();
        store
            .seed(vec![SeedDocument {
                workspace: WS.to_string(),
                author: "abc".to_string(),
                path: "/lobby/~abc/1.txt".to_string(),
                content: "last".to_string(),
                timestamp: Some(MAX_SEED_TIMESTAMP),
            }])
            .unwrap();

        let next = store.set_document(WS, "abc", "/lobby/~abc/2.txt", "after").unwrap();
        assert!(next.timestamp > MAX_SEED_TIMESTAMP);
        let again = store.set_document(WS, "abc", "/lobby/~abc/3.txt", "again").unwrap();
        assert!(again.timestamp > next.timestamp);
    }

    #[test]
    fn test_load_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("seed.json");
        std::fs::write(
            &file,
            r#"[{"workspace":"+cozy.a","author":"abc","path":"/lobby/~abc/1.txt","content":"hi"}]"#,
        )
        .unwrap();
        let docs = load_seed_file(&file).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].timestamp, None);
    }
}
