use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimmerError {
    #[error("config error: {0}")]
    Config(String),

    #[error("not logged in. Run `simmer login` first")]
    NotLoggedIn,

    #[error("the backend did not accept that session cookie. Log in in the browser and copy it again")]
    SessionRejected,

    #[error("{failed} of {total} playlists could not be reordered")]
    BatchFailed { failed: usize, total: usize },

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] simmer_common::Error),
}

impl SimmerError {
    /// Maps auth failures from the backend to the terminal's login hint.
    pub fn or_login_hint(self) -> Self {
        match self {
            SimmerError::Common(simmer_common::Error::Auth) => SimmerError::NotLoggedIn,
            other => other,
        }
    }

    /// Line for stderr when the command ends with this error. `None` when
    /// the command already reported it.
    pub fn report(&self) -> Option<String> {
        match self {
            SimmerError::BatchFailed { .. } => None,
            other => Some(format!("Error: {}", other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimmerError>;
