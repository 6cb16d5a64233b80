//! APNS client.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    Configuration, NotificationType, PushError, Response, Result, SendHandle, Server,
    TransportError, message_payload, request,
};

/// Errors raised while constructing a [`Client`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// The base URL override could not be parsed.
    #[error("Invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// The HTTP stack failed to initialize.
    #[error("Failed to initialize HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP stack options.
///
/// Defaults leave timeouts to the HTTP stack.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Total request timeout.
    pub timeout: Option<Duration>,
    /// Connection establishment timeout.
    pub connect_timeout: Option<Duration>,
    /// User-Agent header for outgoing requests.
    pub user_agent: String,
    /// Speak HTTP/2 without ALPN negotiation.
    pub http2_prior_knowledge: bool,
    /// Send to this base URL instead of the environment's gateway.
    pub base_url: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            user_agent: format!("pushline/{}", env!("CARGO_PKG_VERSION")),
            http2_prior_knowledge: false,
            base_url: None,
        }
    }
}

impl ClientOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable HTTP/2 prior knowledge.
    pub fn http2_prior_knowledge(mut self, enabled: bool) -> Self {
        self.http2_prior_knowledge = enabled;
        self
    }

    /// Override the gateway base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn http_client(&self) -> std::result::Result<reqwest::Client, BuildError> {
        let mut builder = reqwest::Client::builder().user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if self.http2_prior_knowledge {
            builder = builder.http2_prior_knowledge();
        }

        Ok(builder.build()?)
    }
}

/// Builder for [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    configuration: Configuration,
    server: Server,
    options: ClientOptions,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            server: Server::default(),
            options: ClientOptions::default(),
            http: None,
        }
    }

    /// Set the gateway environment.
    pub fn server(mut self, server: Server) -> Self {
        self.server = server;
        self
    }

    /// Set HTTP stack options.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Share an existing HTTP session.
    ///
    /// Timeouts, user agent and HTTP/2 settings in the options are ignored;
    /// the base URL override still applies.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client.
    pub fn build(self) -> std::result::Result<Client, BuildError> {
        let base_url = match &self.options.base_url {
            Some(url) => {
                url::Url::parse(url).map_err(|source| BuildError::InvalidBaseUrl {
                    url: url.clone(),
                    source,
                })?;
                url.trim_end_matches('/').to_string()
            }
            None => self.server.base_url(),
        };

        let http = match self.http {
            Some(http) => http,
            None => self.options.http_client()?,
        };

        Ok(Client {
            configuration: Arc::new(self.configuration),
            server: self.server,
            base_url: base_url.into(),
            http,
        })
    }
}

/// Sends notifications for one device, topic and token.
///
/// Cheap to clone; clones share the HTTP session. Concurrent sends are
/// independent and complete in any order.
#[derive(Debug, Clone)]
pub struct Client {
    configuration: Arc<Configuration>,
    server: Server,
    base_url: Arc<str>,
    http: reqwest::Client,
}

impl Client {
    /// Create a client with its own HTTP session.
    pub fn new(
        configuration: Configuration,
        server: Server,
    ) -> std::result::Result<Self, BuildError> {
        Self::builder(configuration).server(server).build()
    }

    /// Create a client on an existing HTTP session.
    pub fn with_http_client(
        configuration: Configuration,
        server: Server,
        http: reqwest::Client,
    ) -> Self {
        Self {
            configuration: Arc::new(configuration),
            base_url: server.base_url().into(),
            server,
            http,
        }
    }

    /// Create a builder.
    pub fn builder(configuration: Configuration) -> ClientBuilder {
        ClientBuilder::new(configuration)
    }

    /// Get the configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Get the gateway environment.
    pub fn server(&self) -> Server {
        self.server
    }

    /// Get the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the underlying HTTP session.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Full request URL for the configured device.
    pub fn url(&self) -> String {
        crate::device_url(&self.base_url, self.configuration.device_token())
    }

    /// Build the request for a payload without sending it.
    pub fn build_request(
        &self,
        payload: impl Into<String>,
        push_type: NotificationType,
    ) -> Result<reqwest::Request> {
        let request = request::build(
            &self.http,
            &self.base_url,
            &self.configuration,
            payload.into(),
            push_type,
        )?;
        Ok(request)
    }

    /// Send a raw JSON payload and wait for the gateway's verdict.
    pub async fn send(
        &self,
        payload: impl Into<String>,
        push_type: NotificationType,
    ) -> Result<Response> {
        let request = self.build_request(payload, push_type)?;
        self.log_dispatch(push_type);
        execute(&self.http, request).await
    }

    /// Send a plain text alert with the default sound.
    pub async fn send_message(&self, message: &str) -> Result<Response> {
        self.send(message_payload(message), NotificationType::Alert)
            .await
    }

    /// Start sending a raw JSON payload; `completion` receives the outcome.
    ///
    /// The request is built before anything is spawned: if that fails the
    /// error is returned and `completion` is never called. Otherwise
    /// `completion` is called exactly once, on a runtime worker.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch<F>(
        &self,
        payload: impl Into<String>,
        push_type: NotificationType,
        completion: F,
    ) -> Result<SendHandle>
    where
        F: FnOnce(Result<Response>) + Send + 'static,
    {
        let request = self.build_request(payload, push_type)?;
        self.log_dispatch(push_type);

        let http = self.http.clone();
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    debug!("APNS request cancelled");
                    Err(PushError::from(TransportError::Cancelled))
                }
                result = execute(&http, request) => result,
            };
            completion(result);
        });

        Ok(SendHandle::new(token, task))
    }

    /// Start sending a plain text alert; `completion` receives the outcome.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch_message<F>(&self, message: &str, completion: F) -> Result<SendHandle>
    where
        F: FnOnce(Result<Response>) + Send + 'static,
    {
        self.dispatch(message_payload(message), NotificationType::Alert, completion)
    }

    fn log_dispatch(&self, push_type: NotificationType) {
        debug!(
            device = %redact(self.configuration.device_token()),
            topic = %self.configuration.bundle_id(),
            push_type = %push_type,
            "Sending APNS notification"
        );
    }
}

/// Send a built request and classify the reply.
async fn execute(http: &reqwest::Client, request: reqwest::Request) -> Result<Response> {
    let reply = http.execute(request).await?;
    let response = Response::from_reqwest(&reply);

    if !response.is_success() {
        let body = match reply.bytes().await {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => None,
            Err(err) => {
                debug!(error = %err, "Failed to read APNS error body");
                None
            }
        };
        warn!(
            status = %response.status(),
            apns_id = ?response.apns_id(),
            "APNS rejected notification"
        );
        return Err(PushError::InvalidResponse { response, body });
    }

    debug!(apns_id = ?response.apns_id(), "APNS notification sent successfully");
    Ok(response)
}

/// Leading characters of a device token, for logs.
fn redact(token: &str) -> &str {
    token
        .char_indices()
        .nth(8)
        .map_or(token, |(i, _)| &token[..i])
}
