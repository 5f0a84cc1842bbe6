//! Backend connectivity test handler

use crate::chat::ExchangeEngine;
use crate::config::Config;
use crate::error::{Result, SolaceError};

use colored::Colorize;

/// Test connectivity to the model backend
///
/// Sends a minimal single-turn exchange with the given model (or the
/// configured default) and reports the outcome. Returns an error on
/// failure so the process exit status reflects reachability.
pub async fn run_probe(config: &Config, model: Option<String>) -> Result<()> {
    let model = model.unwrap_or_else(|| config.backend.model.clone());
    let engine = ExchangeEngine::new(&config.backend)?;

    println!("Testing connection to {} with {} ...", engine.host(), model);

    if engine.probe(&model).await {
        println!("{}", "Connection successful".green());
        Ok(())
    } else {
        println!("{}", "Connection failed".red());
        Err(SolaceError::Backend(format!("Backend at {} is not responding", engine.host())).into())
    }
}
