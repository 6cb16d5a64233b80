// Pushline - a minimal client for Apple's remote notification gateway
//
// One HTTP request per notification, built from a device token, a provider
// token and a bundle ID, and classified as success, transport failure, or
// rejected response.

// Re-export core functionality
pub use pushline_apns::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use pushline_config;

#[cfg(feature = "config")]
pub use pushline_config::{ConfigError, PushSettings};
