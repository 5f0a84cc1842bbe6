//! Conversation model and exchange engine
//!
//! This module holds the core of the application:
//!
//! - `turn`: the immutable message type and its roles
//! - `conversation`: in-memory ordered conversation state for one session
//! - `prompt`: linearization of a conversation into a completion prompt
//! - `engine`: the retry-wrapped request/response exchange with the backend

pub mod conversation;
pub mod engine;
pub mod prompt;
pub mod turn;

pub use conversation::Conversation;
pub use engine::{Backoff, ExchangeEngine, ExchangeResult, FailureKind};
pub use prompt::{render_prompt, SYSTEM_PREAMBLE};
pub use turn::{now_rfc3339, Role, Turn};
