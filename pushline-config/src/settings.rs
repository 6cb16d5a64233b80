//! Typed push settings.

use pushline_apns::{Client, ClientOptions, Configuration, Server};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::loader::merge;
use crate::{ConfigError, ConfigLoader, EnvLoader, Result};

/// Everything needed to build a [`Client`].
#[derive(Clone, Deserialize)]
pub struct PushSettings {
    pub device_token: String,
    pub authorization_token: String,
    pub bundle_id: String,
    #[serde(default)]
    pub environment: Server,
    #[serde(default)]
    pub http: HttpSettings,
}

/// HTTP stack settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpSettings {
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub timeout_secs: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::bool")]
    pub http2_prior_knowledge: bool,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl PushSettings {
    /// Load from `.env`, an optional settings file, and `PUSHLINE_*` variables.
    ///
    /// Later sources override earlier ones.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Value::Object(Map::new()))
    }

    /// Like [`load`](Self::load), with `overrides` applied last.
    pub fn load_with(path: Option<&Path>, overrides: Value) -> Result<Self> {
        if let Ok(dotenv) = dotenvy::dotenv() {
            debug!(path = %dotenv.display(), "Loaded .env file");
        }

        let mut value = Value::Object(Map::new());

        if let Some(path) = path {
            let loader = ConfigLoader::auto(path)?;
            merge(&mut value, loader.load_file(path)?);
            debug!(path = %path.display(), format = ?loader.format(), "Loaded settings file");
        }

        merge(&mut value, EnvLoader::default().load());
        merge(&mut value, overrides);

        Self::from_value(value)
    }

    /// Deserialize from an already merged settings tree.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Per-client configuration.
    pub fn configuration(&self) -> Configuration {
        Configuration::new(
            self.device_token.clone(),
            self.authorization_token.clone(),
            self.bundle_id.clone(),
        )
    }

    /// HTTP stack options.
    pub fn client_options(&self) -> ClientOptions {
        let mut options = ClientOptions::new().http2_prior_knowledge(self.http.http2_prior_knowledge);

        if let Some(secs) = self.http.timeout_secs {
            options = options.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.http.connect_timeout_secs {
            options = options.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(url) = &self.http.base_url {
            options = options.base_url(url.clone());
        }
        if let Some(agent) = &self.http.user_agent {
            options = options.user_agent(agent.clone());
        }

        options
    }

    /// Build a ready client.
    pub fn build_client(&self) -> Result<Client> {
        let client = Client::builder(self.configuration())
            .server(self.environment)
            .options(self.client_options())
            .build()?;
        Ok(client)
    }
}

impl fmt::Debug for PushSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushSettings")
            .field("device_token", &self.device_token)
            .field("authorization_token", &"<redacted>")
            .field("bundle_id", &self.bundle_id)
            .field("environment", &self.environment)
            .field("http", &self.http)
            .finish()
    }
}

// Environment variables are always strings.
mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    pub fn opt_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Number(n)) => Ok(Some(n)),
            Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
            Some(NumberOrString::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("expected a number, got {s:?}"))),
        }
    }

    pub fn bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match BoolOrString::deserialize(deserializer)? {
            BoolOrString::Bool(b) => Ok(b),
            BoolOrString::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" | "" => Ok(false),
                _ => Err(serde::de::Error::custom(format!("expected a boolean, got {s:?}"))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "device_token": "abc123",
            "authorization_token": "jwt",
            "bundle_id": "com.example.app"
        })
    }

    #[test]
    fn test_defaults() {
        let settings = PushSettings::from_value(minimal()).unwrap();
        assert_eq!(settings.environment, Server::Production);
        assert!(settings.http.timeout_secs.is_none());
        assert!(!settings.http.http2_prior_knowledge);
        assert_eq!(
            settings.configuration(),
            Configuration::new("abc123", "jwt", "com.example.app")
        );
    }

    #[test]
    fn test_missing_field() {
        let err = PushSettings::from_value(json!({ "device_token": "abc" })).unwrap_err();
        assert!(err.to_string().contains("authorization_token"));
    }

    #[test]
    fn test_string_values_from_environment() {
        let mut value = minimal();
        merge(
            &mut value,
            json!({
                "environment": "sandbox",
                "http": {
                    "timeout_secs": "15",
                    "connect_timeout_secs": "",
                    "http2_prior_knowledge": "true"
                }
            }),
        );

        let settings = PushSettings::from_value(value).unwrap();
        assert_eq!(settings.environment, Server::Development);
        assert_eq!(settings.http.timeout_secs, Some(15));
        assert_eq!(settings.http.connect_timeout_secs, None);
        assert!(settings.http.http2_prior_knowledge);
    }

    #[test]
    fn test_bad_number() {
        let mut value = minimal();
        merge(&mut value, json!({ "http": { "timeout_secs": "soon" } }));
        assert!(matches!(
            PushSettings::from_value(value),
            Err(ConfigError::DeserializationError(_))
        ));
    }

    #[test]
    fn test_client_options() {
        let mut value = minimal();
        merge(
            &mut value,
            json!({
                "http": {
                    "timeout_secs": 30,
                    "base_url": "http://127.0.0.1:8443",
                    "user_agent": "ops-tool/2"
                }
            }),
        );

        let settings = PushSettings::from_value(value).unwrap();
        let options = settings.client_options();
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
        assert_eq!(options.base_url.as_deref(), Some("http://127.0.0.1:8443"));
        assert_eq!(options.user_agent, "ops-tool/2");

        let client = settings.build_client().unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:8443/3/device/abc123");
    }

    #[test]
    fn test_build_client_rejects_bad_base_url() {
        let mut value = minimal();
        merge(&mut value, json!({ "http": { "base_url": "::nope::" } }));
        let settings = PushSettings::from_value(value).unwrap();
        assert!(matches!(
            settings.build_client(),
            Err(ConfigError::ClientError(_))
        ));
    }

    #[test]
    fn test_built_client_reports_unreachable_gateway() {
        let mut value = minimal();
        merge(&mut value, json!({ "http": { "base_url": "http://127.0.0.1:9" } }));
        let client = PushSettings::from_value(value).unwrap().build_client().unwrap();

        let err = tokio_test::assert_err!(tokio_test::block_on(client.send_message("hi")));
        assert!(err.is_transport());
    }

    #[test]
    fn test_debug_redacts_token() {
        let settings = PushSettings::from_value(minimal()).unwrap();
        assert!(!format!("{:?}", settings).contains("\"jwt\""));
    }
}
