//! Special commands parser for interactive chat sessions
//!
//! This module parses the slash commands a user can enter at the composer
//! instead of a message. Special commands manage sessions and settings:
//! - Start a new session or switch to a saved one
//! - List and delete saved sessions
//! - Select the active model
//! - Test backend connectivity
//! - Display help and exit
//!
//! Commands are prefixed with `/` and are case-insensitive; anything else
//! is treated as a message for the agent.

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a fresh session, clearing the active conversation
    NewSession,

    /// List saved sessions for the logged-in user
    ListSessions,

    /// Load a saved session by its 1-based listing number
    LoadSession(usize),

    /// Delete a saved session by its 1-based listing number
    DeleteSession(usize),

    /// Switch the active model
    SwitchModel(String),

    /// Test connectivity to the backend with the active model
    Probe,

    /// Display help information
    Help,

    /// Exit the session
    Exit,

    /// Input that is not a special command: send it to the agent
    None,

    /// A slash command that could not be parsed; holds the error message
    Invalid(String),
}

/// Parse one line of composer input
///
/// # Examples
///
/// ```
/// use solace::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/new"), SpecialCommand::NewSession);
/// assert_eq!(parse_special_command("/load 2"), SpecialCommand::LoadSession(2));
/// assert_eq!(parse_special_command("Hello"), SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> SpecialCommand {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return SpecialCommand::None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match command.as_str() {
        "/new" => SpecialCommand::NewSession,
        "/sessions" => SpecialCommand::ListSessions,
        "/load" => parse_index(&command, argument)
            .map(SpecialCommand::LoadSession)
            .unwrap_or_else(SpecialCommand::Invalid),
        "/delete" => parse_index(&command, argument)
            .map(SpecialCommand::DeleteSession)
            .unwrap_or_else(SpecialCommand::Invalid),
        "/model" => {
            if argument.is_empty() {
                SpecialCommand::Invalid(
                    "/model requires a model name\n\nUsage: /model <name>".to_string(),
                )
            } else {
                SpecialCommand::SwitchModel(argument.to_string())
            }
        }
        "/probe" => SpecialCommand::Probe,
        "/help" => SpecialCommand::Help,
        "/quit" | "/exit" => SpecialCommand::Exit,
        other => SpecialCommand::Invalid(format!(
            "Unknown command: {}\n\nType '/help' to see available commands",
            other
        )),
    }
}

/// Parse a 1-based session number argument
fn parse_index(command: &str, argument: &str) -> Result<usize, String> {
    if argument.is_empty() {
        return Err(format!(
            "{} requires a session number\n\nUsage: {} <number> (see /sessions)",
            command, command
        ));
    }
    match argument.parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(format!(
            "Unsupported argument for {}: {}\n\nExpected a session number from /sessions",
            command, argument
        )),
    }
}

/// Print the help text for all special commands
pub fn print_help() {
    println!("Available commands:");
    println!("  /new             Start a new chat session");
    println!("  /sessions        List your saved sessions, newest first");
    println!("  /load <n>        Switch to saved session number <n>");
    println!("  /delete <n>      Delete saved session number <n>");
    println!("  /model <name>    Select the model used for responses");
    println!("  /probe           Test the connection to the model backend");
    println!("  /help            Show this help");
    println!("  /quit            Exit the session");
    println!();
    println!("Anything else is sent to the agent as a message.");
}
