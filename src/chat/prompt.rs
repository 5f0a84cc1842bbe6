//! Prompt rendering for the exchange engine
//!
//! The backend receives a single completion prompt: a fixed instructive
//! preamble, the linearized transcript, and a trailing cue that signals the
//! agent should produce the next turn. The template tolerates an empty
//! transcript, in which case the backend produces a greeting-style opener.

use crate::chat::Turn;

/// Role definition sent ahead of every transcript
pub const SYSTEM_PREAMBLE: &str = "\
You are a caring, empathetic AI psychologist. Your role is to:
- Listen actively and respond with empathy
- Ask thoughtful follow-up questions when appropriate
- Provide supportive guidance while being non-judgmental
- Remember the conversation context
- Encourage professional help for serious issues

Important: You are not a replacement for professional mental health services.";

/// Trailing cue that asks the model for the agent's next turn
const NEXT_TURN_CUE: &str = "AI:";

/// Render the full completion prompt for a conversation
///
/// Each turn is linearized as `<Speaker>: <text>` with speakers `User` and
/// `AI`, joined by newlines.
///
/// # Examples
///
/// ```
/// use solace::chat::{render_prompt, Turn};
///
/// let prompt = render_prompt(&[Turn::user("Hello")]);
/// assert!(prompt.contains("User: Hello"));
/// assert!(prompt.ends_with("AI:"));
/// ```
pub fn render_prompt(turns: &[Turn]) -> String {
    let transcript = turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role.speaker(), turn.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\nConversation so far:\n{}\n\n{}",
        SYSTEM_PREAMBLE, transcript, NEXT_TURN_CUE
    )
}
