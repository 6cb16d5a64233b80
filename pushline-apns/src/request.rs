//! Request construction.

use reqwest::header::AUTHORIZATION;

use crate::{Configuration, NotificationType};

/// Header selecting the push type.
pub const APNS_PUSH_TYPE: &str = "apns-push-type";

/// Header selecting delivery priority.
pub const APNS_PRIORITY: &str = "apns-priority";

/// Header carrying the bundle ID.
pub const APNS_TOPIC: &str = "apns-topic";

/// Priority background pushes must be sent with.
pub const BACKGROUND_PRIORITY: &str = "5";

/// Build the POST for one notification.
///
/// The payload is sent as-is; it is not checked for well-formed JSON.
pub(crate) fn build(
    http: &reqwest::Client,
    base_url: &str,
    configuration: &Configuration,
    payload: String,
    push_type: NotificationType,
) -> reqwest::Result<reqwest::Request> {
    let url = crate::device_url(base_url, configuration.device_token());

    let mut request = http
        .post(url)
        .header(APNS_PUSH_TYPE, push_type.as_str());

    if let Some(priority) = push_type.priority() {
        request = request.header(APNS_PRIORITY, priority);
    }

    request
        .header(AUTHORIZATION, configuration.authorization_header())
        .header(APNS_TOPIC, configuration.bundle_id())
        .body(payload)
        .build()
}
