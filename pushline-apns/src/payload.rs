//! Payload template for plain text messages.

use serde_json::json;

/// Sound name played with plain text messages.
pub const DEFAULT_SOUND: &str = "default";

/// Wrap a message into an alert payload with the default sound.
///
/// The message is JSON-escaped, so quotes and backslashes are safe.
pub fn message_payload(message: &str) -> String {
    json!({
        "aps": {
            "alert": message,
            "sound": DEFAULT_SOUND,
        }
    })
    .to_string()
}
