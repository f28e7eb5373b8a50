use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("Poster not available: {0}")]
    Unavailable(String),

    #[error("Unknown poster: {0}")]
    UnknownPoster(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PostError>;
