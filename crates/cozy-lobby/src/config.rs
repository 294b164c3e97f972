//! Lobby configuration.
//!
//! Defaults match the public lobby conventions; every field can be
//! overridden through `COZY_*` environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LobbyError, Result};
use crate::paths::{is_channel_prefix, DEFAULT_ALLOWED_ROOTS};

/// Schema version used in new channel prefixes (`/chat-<schema>/<name>/`).
pub const DEFAULT_SCHEMA_VERSION: &str = "v1";

/// Channel shown before the user picks one.
pub const DEFAULT_PREFIX: &str = "/lobby/";

/// Window placement, all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Configuration for a lobby instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobbyConfig {
    /// Workspace selected at startup.
    pub workspace: Option<String>,
    /// Author signed in at startup.
    pub author: Option<String>,
    /// JSON file of seed documents loaded into the memory store.
    pub seed_file: Option<PathBuf>,
    /// Schema version for new channel prefixes.
    pub schema_version: String,
    /// Initially active prefix.
    pub default_prefix: String,
    /// Roots a derived prefix must start with to be listed.
    pub allowed_roots: Vec<String>,
    /// Desktop window placement.
    pub window: WindowGeometry,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            workspace: None,
            author: None,
            seed_file: None,
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            default_prefix: DEFAULT_PREFIX.to_string(),
            allowed_roots: DEFAULT_ALLOWED_ROOTS.iter().map(|r| r.to_string()).collect(),
            window: WindowGeometry::default(),
        }
    }
}

impl LobbyConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.workspace = non_empty("COZY_WORKSPACE");
        config.author = non_empty("COZY_AUTHOR");
        config.seed_file = non_empty("COZY_SEED").map(PathBuf::from);

        if let Some(schema) = non_empty("COZY_SCHEMA") {
            config.schema_version = schema;
        }
        if let Some(prefix) = non_empty("COZY_DEFAULT_PATH") {
            config.default_prefix = prefix;
        }
        if let Some(roots) = non_empty("COZY_ALLOWED_ROOTS") {
            config.allowed_roots = roots
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect();
        }

        let coord = |key: &str| -> Result<Option<f64>> {
            non_empty(key)
                .map(|v| {
                    v.parse::<f64>()
                        .map_err(|e| LobbyError::Config(format!("{key}={v}: {e}")))
                })
                .transpose()
        };
        config.window = WindowGeometry {
            x: coord("COZY_WIN_X")?,
            y: coord("COZY_WIN_Y")?,
            width: coord("COZY_WIN_W")?,
            height: coord("COZY_WIN_H")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the lobby relies on.
    pub fn validate(&self) -> Result<()> {
        if !is_channel_prefix(&self.default_prefix) {
            return Err(LobbyError::Config(format!(
                "default prefix must start and end with '/' and hold no '~', '@' or spaces: {}",
                self.default_prefix
            )));
        }
        if self.schema_version.is_empty() || self.schema_version.contains('/') {
            return Err(LobbyError::Config(format!(
                "invalid schema version: {}",
                self.schema_version
            )));
        }
        if self.allowed_roots.is_empty() {
            return Err(LobbyError::Config("allowed roots must not be empty".to_string()));
        }
        if let Some(root) = self.allowed_roots.iter().find(|r| !r.starts_with('/')) {
            return Err(LobbyError::Config(format!("allowed root must start with '/': {root}")));
        }
        Ok(())
    }
}
