use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyrushError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid alphabet {0:?}: expected letters A-Z")]
    InvalidAlphabet(String),

    #[error("invalid {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("could not initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, KeyrushError>;
