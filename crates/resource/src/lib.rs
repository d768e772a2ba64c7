//! Template sources on the local machine.
//!
//! [`FilesystemResourceProvider`] serves a web root or a packaged resources
//! directory. The in-memory provider from `mixview-traits` is re-exported for
//! callers that only depend on this crate.

mod filesystem;

pub use filesystem::FilesystemResourceProvider;
pub use mixview_traits::InMemoryResourceProvider;
