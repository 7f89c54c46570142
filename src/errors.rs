use thiserror::Error;

/// Error type that captures bond collection and persistence failures.
#[derive(Debug, Error)]
pub enum BondError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Index: {index} out of range for {len} bonds")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid bond record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, BondError>;

/// Fatal errors raised while setting up or tearing down the dashboard.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] BondError),
    #[error("Setup failed: {0}")]
    Setup(String),
}
