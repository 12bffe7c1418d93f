use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvpendError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Allocation failure: could not reserve {requested} control steps")]
    Allocation { requested: usize },

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config source error: {0}")]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, InvpendError>;
