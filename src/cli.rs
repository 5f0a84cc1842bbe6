//! Command-line interface definition for Solace
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for chat, account creation, session management,
//! and backend connectivity testing.

use clap::{Parser, Subcommand};

/// Solace - supportive AI conversation client
///
/// Converse with a locally hosted language model acting as a supportive,
/// non-clinical conversational agent, with per-user saved sessions.
#[derive(Parser, Debug, Clone)]
#[command(name = "solace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Solace
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Username to log in as (password is still prompted)
        #[arg(short, long)]
        user: Option<String>,

        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,

        /// Resume a saved session by identifier
        #[arg(short, long)]
        resume: Option<String>,
    },

    /// Manage user accounts
    Account {
        /// Account subcommand
        #[command(subcommand)]
        command: AccountCommand,
    },

    /// Manage saved chat sessions
    Sessions {
        /// Session subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Test connectivity to the model backend
    Probe {
        /// Model to probe with (defaults to the configured model)
        #[arg(short, long)]
        model: Option<String>,
    },
}

/// Account management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AccountCommand {
    /// Create a new account interactively
    Create,
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List saved sessions for a user, newest first
    List {
        /// Username whose sessions to list
        #[arg(short, long)]
        user: String,
    },

    /// Delete one saved session
    Delete {
        /// Username owning the session
        #[arg(short, long)]
        user: String,

        /// Session identifier to delete
        #[arg(short, long)]
        session: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["solace", "chat"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Chat { .. }));
    }

    #[test]
    fn test_cli_parse_chat_with_all_flags() {
        let cli = Cli::try_parse_from([
            "solace", "chat", "--user", "alice", "--model", "phi3", "--resume",
            "chat_20250102_030405",
        ])
        .unwrap();
        if let Commands::Chat {
            user,
            model,
            resume,
        } = cli.command
        {
            assert_eq!(user, Some("alice".to_string()));
            assert_eq!(model, Some("phi3".to_string()));
            assert_eq!(resume, Some("chat_20250102_030405".to_string()));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_account_create() {
        let cli = Cli::try_parse_from(["solace", "account", "create"]).unwrap();
        if let Commands::Account { command } = cli.command {
            assert!(matches!(command, AccountCommand::Create));
        } else {
            panic!("Expected Account command");
        }
    }

    #[test]
    fn test_cli_parse_sessions_list() {
        let cli = Cli::try_parse_from(["solace", "sessions", "list", "--user", "alice"]).unwrap();
        if let Commands::Sessions { command } = cli.command {
            if let SessionCommand::List { user } = command {
                assert_eq!(user, "alice");
            } else {
                panic!("Expected List command");
            }
        } else {
            panic!("Expected Sessions command");
        }
    }

    #[test]
    fn test_cli_parse_sessions_delete() {
        let cli = Cli::try_parse_from([
            "solace",
            "sessions",
            "delete",
            "--user",
            "alice",
            "--session",
            "chat_20250102_030405",
        ])
        .unwrap();
        if let Commands::Sessions { command } = cli.command {
            if let SessionCommand::Delete { user, session } = command {
                assert_eq!(user, "alice");
                assert_eq!(session, "chat_20250102_030405");
            } else {
                panic!("Expected Delete command");
            }
        } else {
            panic!("Expected Sessions command");
        }
    }

    #[test]
    fn test_cli_parse_sessions_list_requires_user() {
        assert!(Cli::try_parse_from(["solace", "sessions", "list"]).is_err());
    }

    #[test]
    fn test_cli_parse_probe_default_model() {
        let cli = Cli::try_parse_from(["solace", "probe"]).unwrap();
        if let Commands::Probe { model } = cli.command {
            assert_eq!(model, None);
        } else {
            panic!("Expected Probe command");
        }
    }

    #[test]
    fn test_cli_parse_probe_with_model() {
        let cli = Cli::try_parse_from(["solace", "probe", "--model", "llama2"]).unwrap();
        if let Commands::Probe { model } = cli.command {
            assert_eq!(model, Some("llama2".to_string()));
        } else {
            panic!("Expected Probe command");
        }
    }

    #[test]
    fn test_cli_parse_with_config_and_verbose() {
        let cli = Cli::try_parse_from(["solace", "--config", "custom.yaml", "-v", "chat"]).unwrap();
        assert_eq!(cli.config, "custom.yaml");
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_config_default_path() {
        let cli = Cli::try_parse_from(["solace", "chat"]).unwrap();
        assert_eq!(cli.config, "config/config.yaml");
    }

    #[test]
    fn test_cli_parse_missing_command() {
        assert!(Cli::try_parse_from(["solace"]).is_err());
    }

    #[test]
    fn test_cli_parse_invalid_command() {
        assert!(Cli::try_parse_from(["solace", "invalid"]).is_err());
    }
}
