use thiserror::Error;

pub type RecsResult<T> = Result<T, RecsError>;

#[derive(Error, Debug)]
pub enum RecsError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to load {source_name}: {message}")]
    Load {
        source_name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RecsError {
    pub fn load(source_name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        RecsError::Load {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}
