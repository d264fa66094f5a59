//! Error handling and exit codes.

use thiserror::Error;

use crate::worker::WorkerError;

/// Application-level failures.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The worker facility failed.
    #[error(transparent)]
    Worker(#[from] WorkerError),
}

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}

/// Map an application error to its exit code.
#[allow(dead_code)]
pub fn handle_error(err: &AppError) -> i32 {
    match err {
        AppError::Config(_) => exit_codes::ERROR_CONFIG,
        AppError::Worker(_) => exit_codes::ERROR_GENERIC,
    }
}
