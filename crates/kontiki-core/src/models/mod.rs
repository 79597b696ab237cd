//! Data models for site documents
//!
//! Categories are fixed in code, remote documents mirror the document store's
//! wire shape, and folder views are derived projections that are never stored.

mod category;
mod document;
mod folder;
mod upload;

pub use category::*;
pub use document::*;
pub use folder::*;
pub use upload::*;
