//! Interactive chat session handler
//!
//! Logs the user in against the credential store, then runs a
//! readline-based loop: special commands manage sessions and settings,
//! anything else is appended to the conversation as a user turn, exchanged
//! with the backend, and the resulting turn is appended and persisted.
//!
//! One exchange is in flight at a time; the loop awaits the engine before
//! accepting further input.

use crate::auth::{CredentialStore, YamlCredentialStore};
use crate::chat::{Conversation, ExchangeEngine, Role, Turn};
use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::error::{Result, SolaceError};
use crate::storage::{format_session_label, new_session_id, FileSessionStore, SessionStore};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Disclaimer shown before every session
///
/// The agent is a supportive conversation partner, not a clinician; this
/// text must stay visible to the user, not only in the model preamble.
const DISCLAIMER: &[&str] = &[
    "This AI is not a licensed therapist or mental health professional.",
    "For crisis situations, contact emergency services.",
    "For professional help, visit https://findahelpline.com",
    "This tool is for supportive conversation only.",
];

/// Start an interactive chat session
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `user` - Optional username; the password is always prompted
/// * `model` - Optional override for the configured model
/// * `resume` - Optional saved session identifier to continue
pub async fn run_chat(
    config: Config,
    user: Option<String>,
    model: Option<String>,
    resume: Option<String>,
) -> Result<()> {
    tracing::info!("Starting interactive chat session");

    let mut rl = DefaultEditor::new()?;

    let credentials = YamlCredentialStore::new(&config.auth.users_file);
    let (username, display_name) = login(&mut rl, &credentials, user)?;

    let mut model = model.unwrap_or_else(|| config.backend.model.clone());
    ensure_known_model(&config, &model)?;

    let engine = ExchangeEngine::new(&config.backend)?;
    let store = FileSessionStore::new(&config.storage.sessions_dir);

    let mut conversation = match resume {
        Some(session_id) => {
            let turns = store.load(&username, &session_id)?;
            tracing::debug!("Resumed session {} with {} turns", session_id, turns.len());
            Conversation::with_turns(session_id, turns)
        }
        None => Conversation::new(new_session_id()),
    };

    print_welcome_banner(&display_name, &model);
    print_transcript(&conversation);

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_special_command(trimmed) {
                    SpecialCommand::NewSession => {
                        conversation.reset(new_session_id());
                        println!("Started a new session.\n");
                        continue;
                    }
                    SpecialCommand::ListSessions => {
                        match listed_sessions(&store, &username, &config) {
                            Ok(sessions) => print_session_list(&sessions),
                            Err(e) => println!("{}", format!("{}", e).red()),
                        }
                        continue;
                    }
                    SpecialCommand::LoadSession(index) => {
                        match resolve_session(&store, &username, &config, index) {
                            Ok(session_id) => match store.load(&username, &session_id) {
                                Ok(turns) => {
                                    conversation = Conversation::with_turns(session_id, turns);
                                    println!(
                                        "Switched to session {}.\n",
                                        format_session_label(conversation.session_id())
                                    );
                                    print_transcript(&conversation);
                                }
                                Err(e) => println!("{}", format!("{}", e).red()),
                            },
                            Err(e) => println!("{}", format!("{}", e).red()),
                        }
                        continue;
                    }
                    SpecialCommand::DeleteSession(index) => {
                        match resolve_session(&store, &username, &config, index) {
                            Ok(session_id) => match store.delete(&username, &session_id) {
                                Ok(()) => {
                                    println!("Deleted session {}.", session_id);
                                    // Deleting the active session also clears
                                    // the in-memory state.
                                    if conversation.session_id() == session_id {
                                        conversation.reset(new_session_id());
                                        println!("Started a new session.");
                                    }
                                    println!();
                                }
                                Err(e) => println!("{}", format!("{}", e).red()),
                            },
                            Err(e) => println!("{}", format!("{}", e).red()),
                        }
                        continue;
                    }
                    SpecialCommand::SwitchModel(name) => {
                        if config.backend.available_models.contains(&name) {
                            model = name;
                            println!("Switched model to {}.\n", model);
                        } else {
                            println!(
                                "{}",
                                format!(
                                    "Unknown model '{}'. Available: {}",
                                    name,
                                    config.backend.available_models.join(", ")
                                )
                                .red()
                            );
                        }
                        continue;
                    }
                    SpecialCommand::Probe => {
                        println!("Testing connection to {} ...", engine.host());
                        if engine.probe(&model).await {
                            println!("{}\n", "Connection successful".green());
                        } else {
                            println!("{}\n", "Connection failed".red());
                        }
                        continue;
                    }
                    SpecialCommand::Help => {
                        print_help();
                        println!();
                        continue;
                    }
                    SpecialCommand::Exit => break,
                    SpecialCommand::Invalid(message) => {
                        println!("{}\n", message.red());
                        continue;
                    }
                    SpecialCommand::None => {
                        // Regular message for the agent
                    }
                }

                rl.add_history_entry(trimmed)?;

                conversation.append(Turn::user(trimmed));
                println!("{}", "Thinking...".dimmed());

                let result = engine.respond(&model, conversation.turns()).await;
                let turn = result.into_turn();
                print_turn(&turn);
                conversation.append(turn);

                // Persistence failures are reported but never end the
                // session; the user may retry with the next message.
                if let Err(e) =
                    store.save(&username, conversation.session_id(), &conversation.snapshot())
                {
                    println!("{}", format!("Failed to save session: {}", e).red());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("Take care, {}.", display_name);
    Ok(())
}

/// Prompt for credentials until a login succeeds
///
/// Returns the username and the stored display name.
fn login(
    rl: &mut DefaultEditor,
    store: &YamlCredentialStore,
    user: Option<String>,
) -> Result<(String, String)> {
    let mut preset = user;
    loop {
        let username = match preset.take() {
            Some(username) => username,
            None => rl.readline("Username: ")?.trim().to_string(),
        };
        if username.is_empty() {
            continue;
        }

        // The username is trimmed; the password is passed through verbatim
        // so surrounding whitespace stays significant.
        let password = rl.readline("Password: ")?;
        if store.verify(&username, &password)? {
            let record = store.lookup(&username)?.ok_or_else(|| {
                SolaceError::Authentication(format!("Missing record for {}", username))
            })?;
            tracing::info!("User {} logged in", username);
            return Ok((username, record.name));
        }

        println!("{}", "Username or password is incorrect".red());
    }
}

/// Reject model overrides outside the configured set
fn ensure_known_model(config: &Config, model: &str) -> Result<()> {
    if config.backend.available_models.iter().any(|m| m == model) {
        Ok(())
    } else {
        Err(SolaceError::Validation(format!(
            "Unknown model '{}'. Available: {}",
            model,
            config.backend.available_models.join(", ")
        ))
        .into())
    }
}

/// Saved sessions capped to the configured listing size
fn listed_sessions(
    store: &FileSessionStore,
    username: &str,
    config: &Config,
) -> Result<Vec<String>> {
    let mut sessions = store.list(username)?;
    sessions.truncate(config.storage.max_listed_sessions);
    Ok(sessions)
}

/// Resolve a 1-based listing number to a session identifier
fn resolve_session(
    store: &FileSessionStore,
    username: &str,
    config: &Config,
    index: usize,
) -> Result<String> {
    let sessions = listed_sessions(store, username, config)?;
    sessions.get(index - 1).cloned().ok_or_else(|| {
        SolaceError::Validation(format!(
            "No session number {}. Use /sessions to list them",
            index
        ))
        .into()
    })
}

/// Print the numbered session list used by `/load <n>` and `/delete <n>`
fn print_session_list(sessions: &[String]) {
    if sessions.is_empty() {
        println!("No saved sessions.\n");
        return;
    }
    for (index, session_id) in sessions.iter().enumerate() {
        println!(
            "  {}. {} ({})",
            index + 1,
            format_session_label(session_id),
            session_id.dimmed()
        );
    }
    println!();
}

fn print_welcome_banner(display_name: &str, model: &str) {
    println!();
    println!("{}", format!("Welcome, {}!", display_name).green().bold());
    println!("Model: {}. Type '/help' for commands, '/quit' to leave.", model);
    println!();
    for line in DISCLAIMER {
        println!("{}", line.yellow());
    }
    println!();
}

/// Print the greeting for an empty session, or replay the transcript
fn print_transcript(conversation: &Conversation) {
    if conversation.is_empty() {
        println!("Welcome! How can I help you today?");
        println!("Feel free to share what's on your mind. I'm here to listen and support you.");
        println!();
        return;
    }
    for turn in conversation.turns() {
        print_turn(turn);
    }
}

fn print_turn(turn: &Turn) {
    match turn.role {
        Role::User => println!("{} {}", "You:".bold(), turn.text),
        Role::Agent => println!("{} {}\n", "AI:".cyan().bold(), turn.text),
    }
}
