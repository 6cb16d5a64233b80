//! Push notification error types.

use bytes::Bytes;
use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::Response;

/// Result type for push operations.
pub type Result<T> = std::result::Result<T, PushError>;

/// Outcome of a send that did not end in a 200 reply.
#[derive(Debug, Error)]
pub enum PushError {
    /// No response was obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response was obtained but its status was not 200.
    #[error("Invalid response: {}", .response.status())]
    InvalidResponse {
        /// Status line and headers of the reply.
        response: Response,
        /// Raw reply body, when the gateway sent one.
        body: Option<Bytes>,
    },
}

/// Why a request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS, TLS, connection, timeout, or request construction failure.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The caller cancelled the request through its [`SendHandle`](crate::SendHandle).
    #[error("Request cancelled")]
    Cancelled,
}

/// JSON body the gateway returns with a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApnsErrorBody {
    /// Reason code, e.g. `BadDeviceToken`.
    pub reason: String,
    /// Milliseconds since the epoch at which the token stopped being valid
    /// (410 replies only).
    #[serde(default)]
    pub timestamp: Option<u64>,
}

impl PushError {
    /// Check if the request never got a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if the request was cancelled by the caller.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Cancelled))
    }

    /// Get the HTTP status of a rejected request.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::InvalidResponse { response, .. } => Some(response.status()),
            Self::Transport(TransportError::Http(e)) => e.status(),
            Self::Transport(TransportError::Cancelled) => None,
        }
    }

    /// Get the raw body of a rejected request.
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::InvalidResponse { body, .. } => body.as_ref(),
            Self::Transport(_) => None,
        }
    }

    /// Parse the gateway's JSON error body.
    pub fn error_body(&self) -> Option<ApnsErrorBody> {
        self.body()
            .and_then(|body| serde_json::from_slice(body).ok())
    }

    /// Get the gateway's reason code, e.g. `BadDeviceToken`.
    pub fn reason(&self) -> Option<String> {
        self.error_body().map(|body| body.reason)
    }

    /// Check if this error indicates the device token should be discarded.
    pub fn should_remove_device(&self) -> bool {
        if self.status() == Some(StatusCode::GONE) {
            return true;
        }
        matches!(
            self.reason().as_deref(),
            Some("BadDeviceToken" | "DeviceTokenNotForTopic" | "Unregistered")
        )
    }
}

impl From<reqwest::Error> for PushError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Http(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    fn rejected(status: u16, body: Option<&'static str>) -> PushError {
        let url = url::Url::parse("https://api.push.apple.com/3/device/abc").unwrap();
        PushError::InvalidResponse {
            response: Response::from_parts(
                StatusCode::from_u16(status).unwrap(),
                HeaderMap::new(),
                url,
            ),
            body: body.map(|b| Bytes::from_static(b.as_bytes())),
        }
    }

    #[test]
    fn test_cancelled() {
        let err = PushError::from(TransportError::Cancelled);
        assert!(err.is_transport());
        assert!(err.is_cancelled());
        assert_eq!(err.status(), None);
        assert!(err.body().is_none());
        assert_eq!(err.to_string(), "Transport error: Request cancelled");
    }

    #[test]
    fn test_invalid_response_reason() {
        let err = rejected(400, Some(r#"{"reason":"BadDeviceToken"}"#));
        assert!(!err.is_transport());
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.reason().as_deref(), Some("BadDeviceToken"));
        assert!(err.should_remove_device());
        assert_eq!(err.to_string(), "Invalid response: 400 Bad Request");
    }

    #[test]
    fn test_unregistered_timestamp() {
        let err = rejected(410, Some(r#"{"reason":"Unregistered","timestamp":1700000000000}"#));
        let body = err.error_body().unwrap();
        assert_eq!(body.reason, "Unregistered");
        assert_eq!(body.timestamp, Some(1_700_000_000_000));
        assert!(err.should_remove_device());
    }

    #[test]
    fn test_non_json_body() {
        let err = rejected(500, Some("upstream exploded"));
        assert_eq!(err.reason(), None);
        assert_eq!(err.body().map(|b| b.as_ref()), Some(&b"upstream exploded"[..]));
        assert!(!err.should_remove_device());
    }

    #[test]
    fn test_gone_without_body() {
        let err = rejected(410, None);
        assert!(err.body().is_none());
        assert!(err.should_remove_device());
    }

    #[test]
    fn test_rate_limited_is_kept() {
        let err = rejected(429, Some(r#"{"reason":"TooManyRequests"}"#));
        assert!(!err.should_remove_device());
    }
}
