//! The passes a typical view runs before the page's own rendering.

pub mod cls;
pub mod errors;
pub mod layout;
pub mod style;

pub use cls::ClsResolver;
pub use errors::ErrorsResolver;
pub use layout::{LayoutResolver, PartsHook, RegionHook};
pub use style::{StyleResolver, version_token};
