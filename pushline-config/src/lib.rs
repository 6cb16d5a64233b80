// Settings management for pushline
//
// Layers a settings file (TOML, JSON or .env) under PUSHLINE_* environment
// variables and turns the result into a ready APNS client.

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat, merge};
pub use settings::{HttpSettings, PushSettings};
