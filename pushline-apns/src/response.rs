//! Gateway response snapshot.

use http::{HeaderMap, StatusCode};

/// Header carrying the notification's canonical UUID.
const APNS_ID: &str = "apns-id";

/// Header the development gateway adds so a delivery can be looked up in
/// the Push Notifications Console.
const APNS_UNIQUE_ID: &str = "apns-unique-id";

/// Status line and headers of a gateway reply.
///
/// The body is not part of the snapshot: successful replies carry none, and
/// rejected replies hand theirs to [`PushError::InvalidResponse`](crate::PushError).
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: url::Url,
}

impl Response {
    /// Capture the parts of a reqwest response that outlive its body.
    pub(crate) fn from_reqwest(response: &reqwest::Response) -> Self {
        Self::from_parts(
            response.status(),
            response.headers().clone(),
            response.url().clone(),
        )
    }

    pub(crate) fn from_parts(status: StatusCode, headers: HeaderMap, url: url::Url) -> Self {
        Self {
            status,
            headers,
            url,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the gateway accepted the notification.
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Get the request URL the response came from.
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Notification UUID assigned by the gateway.
    pub fn apns_id(&self) -> Option<&str> {
        self.header(APNS_ID)
    }

    /// Development-only delivery ID.
    pub fn apns_unique_id(&self) -> Option<&str> {
        self.header(APNS_UNIQUE_ID)
    }
}
