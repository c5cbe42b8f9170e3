//! Delivery channels and message lifecycle statuses.
//!
//! The string constants must match the `CHECK` constraints on the
//! `messages.channel`, `messages.status`, `templates.channel`,
//! `ai_messages.channel` and `ai_messages.status` columns.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CHANNEL_EMAIL: &str = "EMAIL";
pub const CHANNEL_WHATSAPP: &str = "WHATSAPP";

/// All valid channel strings.
pub const VALID_CHANNELS: &[&str] = &[CHANNEL_EMAIL, CHANNEL_WHATSAPP];

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_SENT: &str = "SENT";
pub const STATUS_FAILED: &str = "FAILED";

/// All valid message status strings.
pub const VALID_MESSAGE_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_SENT, STATUS_FAILED];

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Delivery medium for an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Email,
    Whatsapp,
}

impl Channel {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            CHANNEL_EMAIL => Ok(Self::Email),
            CHANNEL_WHATSAPP => Ok(Self::Whatsapp),
            _ => Err(format!(
                "Invalid channel '{s}'. Must be one of: {}",
                VALID_CHANNELS.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => CHANNEL_EMAIL,
            Self::Whatsapp => CHANNEL_WHATSAPP,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MessageStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a single send attempt.
///
/// `Pending` is the only non-terminal state; it moves to exactly one of
/// `Sent` or `Failed` and never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Pending,
    Sent,
    Failed,
}

impl MessageStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_SENT => Ok(Self::Sent),
            STATUS_FAILED => Ok(Self::Failed),
            _ => Err(format!(
                "Invalid message status '{s}'. Must be one of: {}",
                VALID_MESSAGE_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Sent => STATUS_SENT,
            Self::Failed => STATUS_FAILED,
        }
    }

    /// Whether the status is final.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: MessageStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Sent) | (Self::Pending, Self::Failed)
        )
    }
}
