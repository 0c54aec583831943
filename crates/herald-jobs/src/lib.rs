//! `herald-jobs` — job declaration validation and resolution.
//!
//! Raw job declarations are decoded leniently (every field optional, the
//! contact selector kept as raw JSON) so that each defect maps onto its own
//! [`JobError`] variant instead of an opaque parse failure. Validation
//! short-circuits at the first defect, in a fixed order, and any failure
//! aborts the whole run upstream — a partial job list is never scheduled.

pub mod error;
pub mod resolve;
pub mod types;

pub use error::{JobError, Result};
pub use resolve::resolve;
pub use types::{decode_jobs, RawJob, ResolvedJob};
