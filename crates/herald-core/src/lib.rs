//! `herald-core` — shared configuration and error taxonomy.
//!
//! Every other crate in the workspace depends on this one for the
//! process-level [`HeraldError`] type and the TOML/env configuration
//! loader. No runtime logic lives here.

pub mod config;
pub mod error;

pub use config::HeraldConfig;
pub use error::{HeraldError, Result};
