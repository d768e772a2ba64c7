//! Two-tier template resolution.
//!
//! A route such as `/sea/land.html` is first looked up below the web root with
//! the view prefix prepended (`WEB-INF/view/sea/land.html`), then as-is on the
//! packaged provider.

use crate::error::TemplateError;
use mixview_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::sync::Arc;

pub const DEFAULT_VIEW_PREFIX: &str = "/WEB-INF/view";

/// Finds template bytes for a route.
#[derive(Debug, Clone)]
pub struct TemplateLocator {
    web_root: Option<Arc<dyn ResourceProvider>>,
    packaged: Option<Arc<dyn ResourceProvider>>,
    view_prefix: String,
}

impl Default for TemplateLocator {
    fn default() -> Self {
        Self {
            web_root: None,
            packaged: None,
            view_prefix: DEFAULT_VIEW_PREFIX.to_string(),
        }
    }
}

impl TemplateLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_web_root(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.web_root = Some(provider);
        self
    }

    pub fn with_packaged(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.packaged = Some(provider);
        self
    }

    pub fn with_view_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.view_prefix = prefix.into();
        self
    }

    pub fn view_prefix(&self) -> &str {
        &self.view_prefix
    }

    /// The path tried on the web root for `route`.
    pub fn web_path(&self, route: &str) -> String {
        format!("{}{}", self.view_prefix, route)
    }

    /// Loads the template for `route`.
    ///
    /// A provider answering `NotFound` hands over to the next one; any other
    /// provider error aborts the lookup.
    pub fn locate(&self, route: &str) -> Result<SharedResourceData, TemplateError> {
        let web_path = self.web_path(route);
        let attempts = [
            (self.web_root.as_ref(), web_path.as_str()),
            (self.packaged.as_ref(), route),
        ];
        for (provider, path) in attempts {
            let Some(provider) = provider else { continue };
            match try_load(provider.as_ref(), path)? {
                Some(data) => {
                    log::debug!("Located template '{}' via {}", path, provider.name());
                    return Ok(data);
                }
                None => match provider.base_path() {
                    Some(base) => {
                        log::trace!("{} has no template '{}' below {}", provider.name(), path, base.display())
                    }
                    None => log::trace!("{} has no template '{}'", provider.name(), path),
                },
            }
        }
        Err(TemplateError::NotFound {
            route: route.to_string(),
            web_path,
        })
    }
}

fn try_load(provider: &dyn ResourceProvider, path: &str) -> Result<Option<SharedResourceData>, ResourceError> {
    match provider.load(path.trim_start_matches('/')) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
