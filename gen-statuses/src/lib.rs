//! Dialect status generation
//!
//! Rewrites English prose into a stylized dialect and packs it into
//! length-bounded statuses for a char-limited messaging service.

pub mod config;
pub mod error;
pub mod store;
pub mod text;

pub use config::StatusesConfig;
pub use error::{GenerateError, Result};
pub use store::{StatusStore, next_status};
pub use text::{Chunk, DialectTransformer, GenerateOptions, SubstitutionTable, generate};
