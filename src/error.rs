use thiserror::Error;

pub type Result<T> = std::result::Result<T, QaError>;

/// Errors raised while turning a question into an answer
#[derive(Error, Debug)]
pub enum QaError {
    #[error("missing credential: HUGGINGFACE_API_TOKEN environment variable not set")]
    MissingCredential,

    #[error("API request failed: {0}")]
    Transport(String),

    #[error("unexpected response format: {0}")]
    Format(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for QaError {
    fn from(err: reqwest::Error) -> Self {
        QaError::Transport(err.to_string())
    }
}
