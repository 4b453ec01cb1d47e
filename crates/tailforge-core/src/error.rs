//! Error types for tailforge templates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unresolved placeholder '{name}' at line {line}, column {column}")]
    UnresolvedPlaceholder {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("malformed template at line {line}, column {column}: {reason}")]
    MalformedTemplate {
        line: usize,
        column: usize,
        reason: String,
    },

    #[error("invalid substitution: {0}")]
    InvalidSubstitution(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
