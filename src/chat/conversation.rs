//! In-memory conversation state
//!
//! A `Conversation` holds the ordered turn sequence for the active session.
//! Appends never reorder or deduplicate; individual turns are never removed.
//! Starting a new session or switching to a saved one replaces the whole
//! state through `reset` or `with_turns`.

use crate::chat::Turn;

/// Ordered turn sequence scoped to one session identifier
///
/// # Examples
///
/// ```
/// use solace::chat::{Conversation, Turn};
///
/// let mut conversation = Conversation::new("chat_20250102_030405");
/// conversation.append(Turn::user("Hello"));
/// assert_eq!(conversation.len(), 1);
///
/// conversation.reset("chat_20250102_040000");
/// assert!(conversation.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Conversation {
    session_id: String,
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create an empty conversation for the given session identifier
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            turns: Vec::new(),
        }
    }

    /// Create a conversation pre-populated from a saved session
    pub fn with_turns(session_id: impl Into<String>, turns: Vec<Turn>) -> Self {
        Self {
            session_id: session_id.into(),
            turns,
        }
    }

    /// The active session identifier
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Append a turn to the end of the conversation
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Replace the active session identifier and clear all turns
    pub fn reset(&mut self, session_id: impl Into<String>) {
        self.session_id = session_id.into();
        self.turns.clear();
    }

    /// Borrow the ordered turns
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Copy-on-read snapshot of the ordered turns
    ///
    /// The returned vector is independent of later appends, so it is safe
    /// to hand to persistence or rendering.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Number of turns in the conversation
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the conversation has no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
