//! # mixview
//!
//! Renders XHTML templates for action-based web applications. A template is
//! a plain HTML file a designer can open in a browser; the application's view
//! makes it dynamic by editing the parsed tree before it is written out.
//!
//! This crate wires the platform-agnostic core to the filesystem and exposes
//! the builder used by the command line tool.

pub mod builder;
pub mod error;

pub use builder::{RenderingBuilder, render_page};
pub use error::MixviewError;

// Re-export the workspace crates
pub use mixview_core as core;
pub use mixview_dom as dom;
pub use mixview_resource as resource;
pub use mixview_template_core as template;
pub use mixview_traits as traits;

pub use mixview_core::{
    ActionRuntime, ErrorsConvention, HtmlDocument, MixPage, MixRenderingProvider, MixSupporter, MixView,
    NextJourney, RenderError, RenderingConfig, StaticPage, StaticRequestContext, TagKind, TypicalMixView,
    ViewProducer,
};
