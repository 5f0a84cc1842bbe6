//! Solace - supportive AI conversation client library
//!
//! This library provides the core functionality for the Solace chat client:
//! the conversation model, the retry-wrapped exchange engine, credential
//! and session storage, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `chat`: conversation state, prompt rendering, and the exchange engine
//! - `auth`: credential store and account validation
//! - `storage`: per-user session persistence
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//! - `commands`: handlers wired to the CLI
//!
//! # Example
//!
//! ```no_run
//! use solace::chat::{Conversation, ExchangeEngine, Turn};
//! use solace::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     let engine = ExchangeEngine::new(&config.backend)?;
//!     let mut conversation = Conversation::new("chat_20250102_030405");
//!     conversation.append(Turn::user("Hello"));
//!     let turn = engine
//!         .respond(&config.backend.model, conversation.turns())
//!         .await
//!         .into_turn();
//!     conversation.append(turn);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use chat::{Conversation, ExchangeEngine, ExchangeResult, Role, Turn};
pub use config::Config;
pub use error::{Result, SolaceError};
