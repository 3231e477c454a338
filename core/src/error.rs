use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShieldError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing localized text for '{key}'")]
    MissingText { key: String },

    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShieldError {
    pub fn unknown(kind: &'static str, value: &str) -> Self {
        ShieldError::UnknownValue { kind, value: value.to_string() }
    }
}

pub type ShieldResult<T> = Result<T, ShieldError>;
