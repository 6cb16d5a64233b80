// Error types for settings loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid settings: {0}")]
    DeserializationError(String),

    #[error("Failed to build client: {0}")]
    ClientError(#[from] pushline_apns::BuildError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
