//! `herald-directory` — the Recipient Directory and Message Catalog.
//!
//! Both collections are built once at startup and shared read-only for the
//! rest of the process. Ingestion is all-or-nothing: the first invalid or
//! duplicate record aborts the whole run upstream, so a partially valid
//! directory is never scheduled against.

pub mod catalog;
pub mod directory;
pub mod error;
pub mod types;

pub use catalog::MessageCatalog;
pub use directory::Directory;
pub use error::{DirectoryError, Result};
pub use types::{ContactOrigin, ContactRecord};
