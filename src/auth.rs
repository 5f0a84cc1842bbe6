//! Credential store and account validation
//!
//! Credentials live in a single YAML file shaped as
//! `{credentials: {usernames: {username: {name, password}}}, cookie: {...}}`.
//! Passwords are stored as one-way bcrypt hashes, never in plaintext.
//! Reading an absent file creates the default empty structure on disk.

use crate::error::{Result, SolaceError};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Minimum username length accepted at account creation
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length accepted at account creation
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// One stored credential: display name plus bcrypt password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Display name shown after login
    pub name: String,
    /// Bcrypt hash of the password
    pub password: String,
}

/// The `credentials` section of the stored file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// Username-keyed credential records
    #[serde(default)]
    pub usernames: BTreeMap<String, CredentialRecord>,
}

/// Session cookie settings carried alongside the credentials
///
/// Kept in the stored structure for compatibility with the file format;
/// the terminal surface does not issue cookies itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieSettings {
    pub name: String,
    pub key: String,
    pub expiry_days: u32,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: "solace_auth".to_string(),
            key: "change_this_signature_key".to_string(),
            expiry_days: 30,
        }
    }
}

/// Full on-disk credential file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsFile {
    /// User credentials
    #[serde(default)]
    pub credentials: Credentials,
    /// Cookie settings
    #[serde(default)]
    pub cookie: CookieSettings,
}

/// Capability interface for credential backends
///
/// The terminal surface only needs lookup, create, and verify; the storage
/// behind them is swappable.
pub trait CredentialStore {
    /// Look up a credential record by username
    fn lookup(&self, username: &str) -> Result<Option<CredentialRecord>>;

    /// Create a new account
    ///
    /// Validates all fields, rejects duplicate usernames, and persists the
    /// hashed password. On any error the existing records are unchanged.
    fn create(&self, username: &str, name: &str, password: &str) -> Result<()>;

    /// Verify a password against the stored hash
    ///
    /// Unknown usernames verify as false rather than erroring, so callers
    /// cannot distinguish a wrong password from a missing account.
    fn verify(&self, username: &str, password: &str) -> Result<bool>;
}

/// Credential store backed by a single YAML file
pub struct YamlCredentialStore {
    path: PathBuf,
}

impl YamlCredentialStore {
    /// Create a store for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the credential file, creating the default structure if absent
    fn load(&self) -> Result<CredentialsFile> {
        if !self.path.exists() {
            tracing::info!(
                "Credential file {} absent, creating default structure",
                self.path.display()
            );
            let file = CredentialsFile::default();
            self.save(&file)?;
            return Ok(file);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            SolaceError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let file = serde_yaml::from_str(&contents).map_err(|e| {
            SolaceError::Storage(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(file)
    }

    /// Persist the full credential file
    fn save(&self, file: &CredentialsFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SolaceError::Storage(format!(
                        "Failed to create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let contents = serde_yaml::to_string(file)
            .map_err(|e| SolaceError::Storage(format!("Failed to serialize credentials: {}", e)))?;
        std::fs::write(&self.path, contents).map_err(|e| {
            SolaceError::Storage(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for YamlCredentialStore {
    fn lookup(&self, username: &str) -> Result<Option<CredentialRecord>> {
        let file = self.load()?;
        Ok(file.credentials.usernames.get(username).cloned())
    }

    fn create(&self, username: &str, name: &str, password: &str) -> Result<()> {
        if name.is_empty() || username.is_empty() || password.is_empty() {
            return Err(SolaceError::Validation("Please fill in all fields".to_string()).into());
        }
        validate_username(username)?;
        validate_password(password)?;

        let mut file = self.load()?;
        if file.credentials.usernames.contains_key(username) {
            return Err(SolaceError::Validation(format!(
                "Username '{}' already exists. Please choose another",
                username
            ))
            .into());
        }

        let record = CredentialRecord {
            name: name.to_string(),
            password: hash_password(password)?,
        };
        file.credentials.usernames.insert(username.to_string(), record);
        self.save(&file)?;

        tracing::info!("Created account for {}", username);
        Ok(())
    }

    fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let Some(record) = self.lookup(username)? else {
            return Ok(false);
        };
        Ok(bcrypt::verify(password, &record.password).unwrap_or(false))
    }
}

/// Validate username format
///
/// Usernames must be at least [`MIN_USERNAME_LENGTH`] characters and contain
/// only letters, numbers, hyphens, and underscores.
///
/// # Errors
///
/// Returns `SolaceError::Validation` naming the violated rule.
pub fn validate_username(username: &str) -> Result<()> {
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(SolaceError::Validation(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LENGTH
        ))
        .into());
    }
    let allowed = Regex::new(r"^[A-Za-z0-9_-]+$").expect("static pattern");
    if !allowed.is_match(username) {
        return Err(SolaceError::Validation(
            "Username can only contain letters, numbers, hyphens, and underscores".to_string(),
        )
        .into());
    }
    Ok(())
}

/// Validate password strength
///
/// # Errors
///
/// Returns `SolaceError::Validation` when the password is shorter than
/// [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(SolaceError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ))
        .into());
    }
    Ok(())
}

/// Hash a password with bcrypt at the default cost
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| SolaceError::Authentication(format!("Failed to hash password: {}", e)).into())
}
