//! Non-interactive session management handlers

use crate::config::Config;
use crate::error::Result;
use crate::storage::{format_session_label, FileSessionStore, SessionStore};

use colored::Colorize;

/// List saved sessions for a user, newest first
pub fn list_sessions(config: &Config, user: &str) -> Result<()> {
    let store = FileSessionStore::new(&config.storage.sessions_dir);
    let sessions = store.list(user)?;

    if sessions.is_empty() {
        println!("No saved sessions for {}", user);
        return Ok(());
    }

    println!("Saved sessions for {}:", user);
    for (index, session_id) in sessions.iter().enumerate() {
        println!(
            "  {}. {} ({})",
            index + 1,
            format_session_label(session_id),
            session_id.dimmed()
        );
    }
    Ok(())
}

/// Delete one saved session
pub fn delete_session(config: &Config, user: &str, session_id: &str) -> Result<()> {
    let store = FileSessionStore::new(&config.storage.sessions_dir);
    store.delete(user, session_id)?;
    println!("{}", format!("Deleted session {}", session_id).green());
    Ok(())
}
