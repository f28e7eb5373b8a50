//! Poster implementations

mod console;
pub mod mock;

pub use console::ConsolePoster;
pub use mock::MockPoster;

use crate::error::{PostError, Result};
use crate::poster::StatusPoster;

/// Supported poster types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterKind {
    Console,
}

impl PosterKind {
    /// Parse poster kind from string
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" | "stdout" => Ok(Self::Console),
            _ => Err(PostError::UnknownPoster(s.to_string())),
        }
    }
}

/// Create a poster instance by name
pub fn get_poster(name: &str) -> Result<Box<dyn StatusPoster>> {
    match PosterKind::from_str(name)? {
        PosterKind::Console => Ok(Box::new(ConsolePoster::new())),
    }
}
