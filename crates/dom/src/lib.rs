//! Mutable XHTML template tree.
//!
//! Templates are parsed into an owned tree of [`Element`]s, edited in place by
//! the rendering stages and written back out as text.

pub mod entities;
pub mod error;
pub mod node;
pub mod parser;
pub mod query;
pub mod writer;

pub use error::{DomError, Location};
pub use node::{Attribute, Element, HtmlDocument, Node, TagKind};
pub use parser::parse_document;
pub use query::QueryError;
pub use writer::{write_document, write_element};
