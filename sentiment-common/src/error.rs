//! Common error types for the sentiment dashboard

use thiserror::Error;

/// Common result type for bootstrap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the dashboard binaries
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or command-line value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
