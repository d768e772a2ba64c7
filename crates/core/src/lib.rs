//! # mixview-core
//!
//! Platform-agnostic XHTML view rendering core.
//!
//! This crate turns a static XHTML template plus an application view into
//! the page written to the response:
//! - **engine**: template location, reading and writing
//! - **supporter**: tree lookups and edits offered to views
//! - **resolver**: errors, layout, css/js path and classification passes
//! - **renderer**: the per-request render driver
//! - **provider**: the application-wide entry point
//!
//! ## Design Principle
//!
//! Nothing here talks to a servlet container or a filesystem directly. The
//! request, the response, messages, classifications and template bytes all
//! come in through the traits of `mixview-traits`.

// Re-export foundation crates
pub use mixview_dom as dom;
pub use mixview_template_core as template;
pub use mixview_traits as traits;

pub mod config;
pub mod engine;
pub mod error;
pub mod messages;
pub mod path;
pub mod provider;
pub mod renderer;
pub mod resolver;
pub mod supporter;
pub mod table;
pub mod typical;
pub mod view;

pub use config::{ErrorsConvention, RenderingConfig};
pub use engine::MixEngine;
pub use error::RenderError;
pub use messages::{ErrorMessages, ResolvedMessage};
pub use provider::MixRenderingProvider;
pub use renderer::{MixHtmlRenderer, RenderStage};
pub use resolver::{ClsResolver, ErrorsResolver, LayoutResolver, StyleResolver, version_token};
pub use supporter::MixSupporter;
pub use table::TableDataResource;
pub use typical::{MixPage, StaticPage, TypicalMixView};
pub use view::{MixView, NextJourney, ViewProducer, ViewState};

// Re-export the types views touch most
pub use dom::{Element, HtmlDocument, TagKind};
pub use traits::{
    ActionMessage, ActionMessages, ActionRuntime, BufferedResponse, Classification, ClassificationProvider,
    RequestContext, ResourceProvider, ResponseWriter, StaticRequestContext,
};
