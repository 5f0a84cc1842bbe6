/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four top-level command modules:

- `chat`     — Interactive chat session
- `account`  — Account creation
- `sessions` — Saved session listing and deletion
- `probe`    — Backend connectivity test

These handlers are intentionally small and use the library components:
the credential store, the session store, and the exchange engine.
*/

pub mod account;
pub mod chat;
pub mod probe;
pub mod sessions;
pub mod special_commands;
