//! Rendering settings shared by the provider and the typical view.

use crate::error::RenderError;
use mixview_template_core::DEFAULT_VIEW_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LAYOUT_PATH: &str = "/common/layout.html";
pub const DEFAULT_HEADER_ID: &str = "header";
pub const DEFAULT_FOOTER_ID: &str = "footer";
pub const DEFAULT_SHOW_ERRORS_PATH: &str = "/error/show_errors.html";

/// How error placeholders are marked in templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorsConvention {
    /// `data-errors="all"` or `data-errors="<property>"`.
    #[default]
    DataAttribute,
    /// `id="errors-all"` or `id="errors-<property>"`.
    IdPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderingConfig {
    /// Prepended to a route when looking it up below the web root.
    pub view_prefix: String,
    pub layout_path: String,
    pub header_id: String,
    pub footer_id: String,
    pub suppress_header: bool,
    pub suppress_footer: bool,
    pub suppress_head_merge: bool,
    pub suppress_script_append: bool,
    /// Appends `?v=<process start millis>` to css/js paths.
    pub version_query: bool,
    pub errors_convention: ErrorsConvention,
    /// Expands `<option data-cls="...">` from the classification provider.
    pub classifications: bool,
    /// Forward path of the page showing errors.
    pub show_errors_path: String,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            view_prefix: DEFAULT_VIEW_PREFIX.to_string(),
            layout_path: DEFAULT_LAYOUT_PATH.to_string(),
            header_id: DEFAULT_HEADER_ID.to_string(),
            footer_id: DEFAULT_FOOTER_ID.to_string(),
            suppress_header: false,
            suppress_footer: false,
            suppress_head_merge: false,
            suppress_script_append: false,
            version_query: false,
            errors_convention: ErrorsConvention::default(),
            classifications: false,
            show_errors_path: DEFAULT_SHOW_ERRORS_PATH.to_string(),
        }
    }
}

impl RenderingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json).map_err(|e| RenderError::Config(format!("Invalid rendering config: {e}")))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| RenderError::Config(format!("Failed to read config from '{}': {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn with_view_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.view_prefix = prefix.into();
        self
    }

    pub fn with_layout_path(mut self, path: impl Into<String>) -> Self {
        self.layout_path = path.into();
        self
    }

    pub fn with_version_query(mut self, enabled: bool) -> Self {
        self.version_query = enabled;
        self
    }

    pub fn with_errors_convention(mut self, convention: ErrorsConvention) -> Self {
        self.errors_convention = convention;
        self
    }

    pub fn with_classifications(mut self, enabled: bool) -> Self {
        self.classifications = enabled;
        self
    }

    pub fn with_show_errors_path(mut self, path: impl Into<String>) -> Self {
        self.show_errors_path = path.into();
        self
    }
}
