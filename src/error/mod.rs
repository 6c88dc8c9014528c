mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::format_error_chain;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NixSearchError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Failed to encode search query: {0}")]
    QueryEncoding(String),

    #[error("Search API failed with status={status}: {body}")]
    BackendUnexpected { status: u16, body: String },

    #[error("Search API failed with status={status}: index={index} does not exist (invalid channel '{channel}')")]
    ChannelNotFound {
        channel: String,
        index: String,
        status: u16,
    },

    #[error("{0}")]
    BackendReported(String),

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] attohttpc::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NixSearchError>;
