use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("unsplittable token ({length} chars, limit {limit}): {token}")]
    UnsplittableToken {
        token: String,
        length: usize,
        limit: usize,
    },

    #[error("Invalid length limit {0}: must be at least 3 to fit continuation markers")]
    InvalidLimit(usize),

    #[error("No statuses to post")]
    EmptyStatuses,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, GenerateError>;
