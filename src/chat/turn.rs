//! Conversation turn types
//!
//! A turn is one message in a conversation, attributed to the user or the
//! agent, with text and an RFC-3339 timestamp. Turns are immutable once
//! created; the stored JSON keys are `role`, `text`, and `timestamp`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The authenticated user
    User,
    /// The conversational agent
    Agent,
}

impl Role {
    /// Speaker label used when linearizing a conversation into a prompt
    pub fn speaker(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Agent => "AI",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Agent => write!(f, "agent"),
        }
    }
}

/// One message in a conversation
///
/// # Examples
///
/// ```
/// use solace::chat::{Role, Turn};
///
/// let turn = Turn::user("Hello");
/// assert_eq!(turn.role, Role::User);
/// assert_eq!(turn.text, "Hello");
/// assert!(!turn.timestamp.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Author of the turn
    pub role: Role,
    /// Message text
    pub text: String,
    /// Creation time (RFC-3339)
    pub timestamp: String,
}

impl Turn {
    /// Create a turn with a fresh timestamp
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: now_rfc3339(),
        }
    }

    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an agent turn
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Role::Agent, text)
    }
}

/// Get current timestamp in RFC-3339 format
///
/// Used consistently for all turn timestamps so stored conversations are
/// parseable with standard time tooling.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
