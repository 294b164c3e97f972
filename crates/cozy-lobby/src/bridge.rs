//! Store bridge: opens the document store the lobby runs against.

use std::sync::Arc;

use tracing::info;

use crate::config::LobbyConfig;
use crate::error::Result;
use crate::store::{load_seed_file, DocumentStore, MemoryStore};

/// Handle to the document store shared by every lobby component.
#[derive(Clone)]
pub struct StoreHandle {
    pub store: Arc<dyn DocumentStore>,
}

impl StoreHandle {
    pub fn new(store: impl DocumentStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle").finish_non_exhaustive()
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

/// Everything the desktop app needs at launch.
#[derive(Clone, Debug, PartialEq)]
pub struct LobbyBoot {
    pub config: LobbyConfig,
    pub store: StoreHandle,
}

/// Open an in-memory store, apply the seed file and register the startup workspace.
pub fn boot(config: LobbyConfig) -> Result<LobbyBoot> {
    let store = MemoryStore::new();

    if let Some(seed_path) = &config.seed_file {
        let docs = load_seed_file(seed_path)?;
        info!(path = %seed_path.display(), count = docs.len(), "loading seed documents");
        store.seed(docs)?;
    }
    if let Some(workspace) = &config.workspace {
        store.add_workspace(workspace);
    }

    Ok(LobbyBoot {
        config,
        store: StoreHandle::new(store),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Query;

    #[test]
    fn test_boot_registers_workspace() {
        let config = LobbyConfig {
            workspace: Some("+cozy.a".to_string()),
            ..LobbyConfig::default()
        };
        let boot = boot(config).unwrap();
        assert_eq!(boot.store.store.workspaces(), vec!["+cozy.a".to_string()]);
    }

    #[test]
    fn test_boot_applies_seed() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.json");
        std::fs::write(
            &seed,
            r#"[
                {"workspace":"+cozy.a","author":"@suzy.bxxx","path":"/lobby/~@suzy.bxxx/1.txt","content":"hi","timestamp":10},
                {"workspace":"+cozy.a","author":"@bob.byyy","path":"/chat-v1/films/~@bob.byyy/2.txt","content":"yo"}
            ]"#,
        )
        .unwrap();
        let config = LobbyConfig {
            seed_file: Some(seed),
            ..LobbyConfig::default()
        };
        let boot = boot(config).unwrap();
        let docs = boot
            .store
            .store
            .query_documents("+cozy.a", &Query::with_content())
            .unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_boot_missing_seed_file() {
        let config = LobbyConfig {
            seed_file: Some("/definitely/not/here.json".into()),
            ..LobbyConfig::default()
        };
        assert!(boot(config).is_err());
    }

    #[test]
    fn test_handle_equality_is_identity() {
        let a = StoreHandle::new(MemoryStore::new());
        let b = StoreHandle::new(MemoryStore::new());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
