//! Template location and reading for the mixview renderer.
//!
//! ## Key Abstractions
//!
//! - **`TemplateLocator`**: resolves a route against the web root, then the packaged resources
//! - **`TemplateReader`**: enforces the DOCTYPE/`<html>` line convention and parses the tree
//! - **`LoadedTemplate`**: the parsed tree with the bookkeeping needed to restore the output

pub mod error;
pub mod loaded;
pub mod locator;
pub mod reader;

pub use error::TemplateError;
pub use loaded::LoadedTemplate;
pub use locator::{DEFAULT_VIEW_PREFIX, TemplateLocator};
pub use reader::{ReadText, TemplateReader};
