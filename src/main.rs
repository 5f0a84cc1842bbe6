//! Solace - supportive AI conversation client
//!
//! Main entry point: initializes tracing, loads configuration, and
//! dispatches to the command handlers.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use solace::cli::{AccountCommand, Cli, Commands, SessionCommand};
use solace::commands;
use solace::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load and validate configuration
    let config = Config::load(&cli.config)?;
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat {
            user,
            model,
            resume,
        } => {
            tracing::info!("Starting chat command");
            commands::chat::run_chat(config, user, model, resume).await
        }
        Commands::Account { command } => match command {
            AccountCommand::Create => {
                tracing::info!("Starting account creation");
                commands::account::create_account(&config)
            }
        },
        Commands::Sessions { command } => match command {
            SessionCommand::List { user } => commands::sessions::list_sessions(&config, &user),
            SessionCommand::Delete { user, session } => {
                commands::sessions::delete_session(&config, &user, &session)
            }
        },
        Commands::Probe { model } => {
            tracing::info!("Starting connectivity probe");
            commands::probe::run_probe(&config, model).await
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "solace=debug" } else { "solace=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
