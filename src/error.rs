use std::path::PathBuf;

use thiserror::Error;

/// Main error type for archmetrics operations
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parser error: {0}")]
    Parser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{} is not a directory", .0.display())]
    InvalidRoot(PathBuf),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
