//! Serves templates from below a directory: a web root such as
//! `src/main/webapp`, or a packaged resources directory.

use mixview_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Paths are relative to the root. A path that is absolute, climbs with `..`
/// or resolves (through links) outside the root is reported as not found, so
/// a locator falls through instead of reading arbitrary files.
#[derive(Debug)]
pub struct FilesystemResourceProvider {
    root: PathBuf,
    /// `None` while the directory does not exist
    canonical_root: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self { root, canonical_root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn contained(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !plain {
            return None;
        }
        let full = self.root.join(relative);
        match (full.canonicalize(), &self.canonical_root) {
            (Ok(canonical), Some(root)) => canonical.starts_with(root).then_some(canonical),
            _ => Some(full),
        }
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full = self.contained(path).ok_or_else(|| ResourceError::not_found(path))?;
        log::trace!("Reading template resource {}", full.display());
        match std::fs::read(&full) {
            Ok(bytes) => Ok(Arc::new(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ResourceError::not_found(path)),
            Err(e) => Err(ResourceError::Unreadable {
                path: path.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.contained(path).is_some_and(|p| p.is_file())
    }

    fn base_path(&self) -> Option<&Path> {
        Some(&self.root)
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
