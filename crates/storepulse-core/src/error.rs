//! Error types for StorePulse.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A scope matched zero stores. Fatal to the request that supplied it.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An external fetch exceeded its time budget. Surfaced distinctly so the
    /// caller can suggest narrowing the scope.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// An external collaborator errored or returned malformed data in a way
    /// that prevents producing any result at all. Partial upstream failures
    /// are absorbed at the call site instead.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
