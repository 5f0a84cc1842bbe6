//! Session persistence
//!
//! One JSON file per (user, session) under a per-user directory. The file
//! body is the full ordered turn sequence; the filename is the session
//! identifier plus `.json`. The store trait keeps the backend swappable
//! without touching the exchange engine.

use crate::chat::Turn;
use crate::error::{Result, SolaceError};

use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Capability interface for session persistence backends
pub trait SessionStore {
    /// List all session identifiers for a user, newest first
    fn list(&self, username: &str) -> Result<Vec<String>>;

    /// Load the full turn sequence of one session
    fn load(&self, username: &str, session_id: &str) -> Result<Vec<Turn>>;

    /// Persist the full turn sequence of one session
    fn save(&self, username: &str, session_id: &str, turns: &[Turn]) -> Result<()>;

    /// Delete one session record
    fn delete(&self, username: &str, session_id: &str) -> Result<()>;
}

/// Session store backed by per-user directories of JSON files
///
/// # Examples
///
/// ```no_run
/// use solace::storage::{new_session_id, FileSessionStore, SessionStore};
/// use solace::chat::Turn;
///
/// # fn main() -> solace::error::Result<()> {
/// let store = FileSessionStore::new("chat_sessions");
/// let session_id = new_session_id();
/// store.save("alice", &session_id, &[Turn::user("Hello")])?;
/// # Ok(())
/// # }
/// ```
pub struct FileSessionStore {
    root: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Per-user directory, created on demand
    fn user_dir(&self, username: &str) -> Result<PathBuf> {
        ensure_safe_component(username)?;
        let dir = self.root.join(username);
        std::fs::create_dir_all(&dir).map_err(|e| {
            SolaceError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(dir)
    }

    /// Full path of one session file
    fn session_path(&self, username: &str, session_id: &str) -> Result<PathBuf> {
        ensure_safe_component(session_id)?;
        Ok(self.user_dir(username)?.join(format!("{}.json", session_id)))
    }
}

impl SessionStore for FileSessionStore {
    fn list(&self, username: &str) -> Result<Vec<String>> {
        let dir = self.user_dir(username)?;
        let mut sessions = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(|e| {
            SolaceError::Storage(format!("Failed to read {}: {}", dir.display(), e))
        })? {
            let entry = entry.map_err(|e| {
                SolaceError::Storage(format!("Failed to read {}: {}", dir.display(), e))
            })?;
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(session_id) = name.strip_suffix(".json") {
                sessions.push(session_id.to_string());
            }
        }
        // Identifiers encode the creation time, so lexicographic descending
        // order is newest first.
        sessions.sort_by(|a, b| b.cmp(a));
        Ok(sessions)
    }

    fn load(&self, username: &str, session_id: &str) -> Result<Vec<Turn>> {
        let path = self.session_path(username, session_id)?;
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            SolaceError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let turns = serde_json::from_str(&contents).map_err(|e| {
            SolaceError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(turns)
    }

    fn save(&self, username: &str, session_id: &str, turns: &[Turn]) -> Result<()> {
        let path = self.session_path(username, session_id)?;
        let contents = serde_json::to_string_pretty(turns)
            .map_err(|e| SolaceError::Storage(format!("Failed to serialize session: {}", e)))?;
        std::fs::write(&path, contents).map_err(|e| {
            SolaceError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::debug!("Saved session {} for {}", session_id, username);
        Ok(())
    }

    fn delete(&self, username: &str, session_id: &str) -> Result<()> {
        let path = self.session_path(username, session_id)?;
        std::fs::remove_file(&path).map_err(|e| {
            SolaceError::Storage(format!("Failed to delete {}: {}", path.display(), e))
        })?;
        tracing::debug!("Deleted session {} for {}", session_id, username);
        Ok(())
    }
}

/// Reject path components that could escape the store root
fn ensure_safe_component(component: &str) -> Result<()> {
    if component.is_empty()
        || component == "."
        || component == ".."
        || component.contains('/')
        || component.contains('\\')
    {
        return Err(SolaceError::Storage(format!(
            "Invalid path component '{}'",
            component
        ))
        .into());
    }
    Ok(())
}

/// Generate a fresh session identifier from the current local time
///
/// Identifiers have the form `chat_YYYYMMDD_HHMMSS`, which keeps them
/// unique per user in practice and sortable by recency.
pub fn new_session_id() -> String {
    format!("chat_{}", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Human-readable label for a session identifier
///
/// Parses the embedded creation time back out of the identifier; falls back
/// to the raw identifier when it does not match the expected shape.
pub fn format_session_label(session_id: &str) -> String {
    session_id
        .strip_prefix("chat_")
        .and_then(|stamp| NaiveDateTime::parse_from_str(stamp, "%Y%m%d_%H%M%S").ok())
        .map(|dt| dt.format("%d-%m-%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| session_id.to_string())
}
