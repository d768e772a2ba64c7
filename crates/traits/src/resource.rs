//! Where template bytes come from.
//!
//! Templates and layout parts are addressed by slash-separated paths relative
//! to a provider root. The renderer only ever asks a provider, so tests and
//! embedded deployments can serve templates from memory.

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::Path;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read resource '{path}': {message}")]
    Unreadable { path: String, message: String },
}

impl ResourceError {
    pub fn not_found(path: impl Into<String>) -> Self {
        ResourceError::NotFound { path: path.into() }
    }

    /// The provider has no such resource, as opposed to failing to read it.
    /// Locators fall through to their next provider only in this case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound { .. })
    }
}

/// Reference-counted resource bytes.
pub type SharedResourceData = Arc<Vec<u8>>;

/// A source of template resources.
///
/// Implemented by `FilesystemResourceProvider` (in `mixview-resource`) and
/// [`InMemoryResourceProvider`].
pub trait ResourceProvider: Send + Sync + Debug {
    /// Load a resource by its relative path.
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, path: &str) -> bool {
        self.load(path).is_ok()
    }

    /// Directory that paths are resolved against, if the provider has one.
    fn base_path(&self) -> Option<&Path> {
        None
    }

    /// Shown in logs.
    fn name(&self) -> &'static str;
}

/// Templates held in memory, keyed by path. A leading `/` on a key is ignored.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

fn key_of(path: &str) -> &str {
    path.trim_start_matches('/')
}

fn poisoned(path: &str) -> ResourceError {
    ResourceError::Unreadable {
        path: path.to_string(),
        message: "resource store lock poisoned".to_string(),
    }
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `path`, replacing what was there.
    pub fn insert(&self, path: &str, data: impl Into<Vec<u8>>) -> Result<(), ResourceError> {
        self.resources
            .write()
            .map_err(|_| poisoned(path))?
            .insert(key_of(path).to_string(), Arc::new(data.into()));
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) for text templates.
    pub fn with_text(self, path: impl Into<String>, text: &str) -> Result<Self, ResourceError> {
        let path: String = path.into();
        self.insert(&path, text)?;
        Ok(self)
    }

    /// Stored paths in sorted order.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .resources
            .read()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default();
        paths.sort();
        paths
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        self.resources
            .read()
            .map_err(|_| poisoned(path))?
            .get(key_of(path))
            .cloned()
            .ok_or_else(|| ResourceError::not_found(path))
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}
