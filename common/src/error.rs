//! Error types shared by every front end

use thiserror::Error;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    /// The backend reported that nobody is logged in (401/403).
    #[error("not logged in")]
    Auth,

    #[error("network error: {0}")]
    Network(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("no playlist selected")]
    NoSelection,

    /// A transformation batch is still in flight.
    #[error("a transformation is already in progress")]
    Busy,

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the caller should route the user to the login view instead of
    /// showing a transient message.
    pub fn requires_login(&self) -> bool {
        matches!(self, Error::Auth)
    }

    /// Maps a non-success HTTP status to the matching error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => Error::Auth,
            _ => Error::Server {
                status,
                message: message.into(),
            },
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
