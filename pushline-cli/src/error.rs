//! Error types for the pushline CLI.

use pushline_apns::PushError;
use pushline_config::ConfigError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded or the client could not be built
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Payload file could not be read
    #[error("Failed to read payload from {path}: {source}")]
    Payload {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The gateway did not accept the notification
    #[error("{}", describe(.0))]
    Push(#[from] PushError),
}

fn describe(err: &PushError) -> String {
    match err.reason() {
        Some(reason) => format!("{} ({})", err, reason),
        None => err.to_string(),
    }
}
