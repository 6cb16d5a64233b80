//! Per-client notification configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three strings every request is derived from.
///
/// Values are taken as given; nothing is validated here. A malformed token
/// or topic surfaces as a gateway rejection.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    device_token: String,
    authorization_token: String,
    bundle_id: String,
}

impl Configuration {
    /// Create a new configuration.
    pub fn new(
        device_token: impl Into<String>,
        authorization_token: impl Into<String>,
        bundle_id: impl Into<String>,
    ) -> Self {
        Self {
            device_token: device_token.into(),
            authorization_token: authorization_token.into(),
            bundle_id: bundle_id.into(),
        }
    }

    /// Target device token.
    pub fn device_token(&self) -> &str {
        &self.device_token
    }

    /// Provider authentication token (JWT).
    pub fn authorization_token(&self) -> &str {
        &self.authorization_token
    }

    /// Bundle ID, sent as the `apns-topic`.
    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    /// Value of the `authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("bearer {}", self.authorization_token)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("device_token", &self.device_token)
            .field("authorization_token", &"<redacted>")
            .field("bundle_id", &self.bundle_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let config = Configuration::new("abc123", "jwt", "com.example.app");
        assert_eq!(config.device_token(), "abc123");
        assert_eq!(config.authorization_token(), "jwt");
        assert_eq!(config.bundle_id(), "com.example.app");
    }

    #[test]
    fn test_authorization_header() {
        let config = Configuration::new("abc123", "eyJhbGciOiJFUzI1NiJ9.e30.sig", "com.example.app");
        assert_eq!(
            config.authorization_header(),
            "bearer eyJhbGciOiJFUzI1NiJ9.e30.sig"
        );

        let empty = Configuration::new("abc123", "", "com.example.app");
        assert_eq!(empty.authorization_header(), "bearer ");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Configuration::new("abc123", "super-secret", "com.example.app");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("abc123"));
    }

    #[test]
    fn test_deserialize() {
        let config: Configuration = serde_json::from_str(
            r#"{"device_token":"abc","authorization_token":"jwt","bundle_id":"com.example"}"#,
        )
        .unwrap();
        assert_eq!(config, Configuration::new("abc", "jwt", "com.example"));
    }
}
