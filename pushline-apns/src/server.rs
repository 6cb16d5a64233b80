//! Gateway environments.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Production gateway host.
pub const PRODUCTION_HOST: &str = "api.push.apple.com";

/// Development (sandbox) gateway host.
pub const DEVELOPMENT_HOST: &str = "api.sandbox.push.apple.com";

/// APNS environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Server {
    /// Production environment.
    #[default]
    Production,
    /// Development/sandbox environment.
    #[serde(alias = "sandbox")]
    Development,
}

impl Server {
    /// Gateway host name.
    pub fn host(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_HOST,
            Self::Development => DEVELOPMENT_HOST,
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.host())
    }

    /// Full request URL for a device token.
    pub fn url(&self, device_token: &str) -> String {
        device_url(&self.base_url(), device_token)
    }

    /// Lowercase environment name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

/// Bytes escaped in a single path segment, including `/` and `%`.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Append the `/3/device/{token}` path to a base URL.
///
/// The token is percent-encoded so it always stays one path segment.
pub fn device_url(base_url: &str, device_token: &str) -> String {
    format!(
        "{}/3/device/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(device_token, SEGMENT)
    )
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown environment name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown APNS environment: {0} (expected production or development)")]
pub struct UnknownServer(pub String);

impl FromStr for Server {
    type Err = UnknownServer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" | "sandbox" => Ok(Self::Development),
            _ => Err(UnknownServer(s.to_string())),
        }
    }
}
