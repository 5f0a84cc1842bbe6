//! Account creation handler
//!
//! Prompts for a full name, username, and password, validates them, and
//! persists the new credential record. Validation failures are reported
//! immediately and nothing is written.

use crate::auth::{CredentialStore, YamlCredentialStore};
use crate::config::Config;
use crate::error::Result;

use colored::Colorize;
use rustyline::DefaultEditor;

/// Create a new account interactively
///
/// # Arguments
///
/// * `config` - Global configuration (locates the credential file)
pub fn create_account(config: &Config) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("Create a new account");
    println!();

    let name = rl.readline("Full name: ")?;
    let username = rl.readline("Username: ")?;
    let password = rl.readline(&format!(
        "Password (at least {} characters): ",
        crate::auth::MIN_PASSWORD_LENGTH
    ))?;

    // Name and username are trimmed; the password is stored verbatim so
    // surrounding whitespace stays significant.
    let store = YamlCredentialStore::new(&config.auth.users_file);
    match store.create(username.trim(), name.trim(), &password) {
        Ok(()) => {
            println!();
            println!(
                "{}",
                "Account created successfully! You can now log in with `solace chat`.".green()
            );
            Ok(())
        }
        Err(e) => {
            println!();
            println!("{}", format!("{}", e).red());
            Err(e)
        }
    }
}
