//! The `apns-push-type` header values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Notification push type.
///
/// Selects the `apns-push-type` header. `Background` additionally lowers the
/// request priority, which the gateway requires for silent pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// User-visible alert, sound or badge.
    #[default]
    Alert,
    /// Silent content update delivered to the app in the background.
    Background,
    /// Location query for a Location Push Service extension.
    Location,
    /// Incoming VoIP call (PushKit).
    Voip,
    /// watchOS complication update.
    Complication,
    /// File Provider extension change signal.
    FileProvider,
    /// Mobile device management check-in.
    Mdm,
    /// Live Activity update.
    LiveActivity,
    /// Push to Talk channel update.
    PushToTalk,
}

impl NotificationType {
    /// Every push type, in declaration order.
    pub const ALL: [NotificationType; 9] = [
        Self::Alert,
        Self::Background,
        Self::Location,
        Self::Voip,
        Self::Complication,
        Self::FileProvider,
        Self::Mdm,
        Self::LiveActivity,
        Self::PushToTalk,
    ];

    /// Header value sent as `apns-push-type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Background => "background",
            Self::Location => "location",
            Self::Voip => "voip",
            Self::Complication => "complication",
            Self::FileProvider => "fileprovider",
            Self::Mdm => "mdm",
            Self::LiveActivity => "liveactivity",
            Self::PushToTalk => "pushtotalk",
        }
    }

    /// Required `apns-priority` value, if this type needs one.
    pub fn priority(&self) -> Option<&'static str> {
        match self {
            Self::Background => Some(crate::BACKGROUND_PRIORITY),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown push type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown push type: {0}")]
pub struct UnknownPushType(pub String);

impl FromStr for NotificationType {
    type Err = UnknownPushType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|push_type| push_type.as_str() == wanted)
            .ok_or_else(|| UnknownPushType(s.to_string()))
    }
}
