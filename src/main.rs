//! Razer Nari headset driver CLI
//!
//! A command-line interface for controlling Razer Nari headset lighting.

use anyhow::Result;
use clap::Parser;
use nari_driver::DriverConfig;
use tracing::debug;

// CLI definitions
mod cli;
use cli::{AttrCommands, Cli, Commands};

// Command handlers
mod commands;
use commands::ConnectOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config, then let flags override it
    let config_path = cli.config.clone().unwrap_or_else(DriverConfig::default_path);
    let mut config = DriverConfig::load(&config_path)?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    if cli.pid.is_some() {
        config.product_id = cli.pid;
    }

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    debug!("Using config from {:?}: {:?}", config_path, config);

    let opts = ConnectOptions {
        config,
        monitor: cli.monitor,
    };

    match cli.command {
        None => {
            // Default: show device info
            commands::query::info(&opts)?;
        }

        // === Query Commands ===
        Some(Commands::List { json }) => {
            commands::query::list(&opts, json)?;
        }
        Some(Commands::Info) => {
            commands::query::info(&opts)?;
        }
        Some(Commands::Status { hex }) => {
            commands::query::status(&opts, hex)?;
        }

        // === Set Commands ===
        Some(Commands::None) => {
            commands::set::none(&opts)?;
        }
        Some(Commands::Static { r, g, b, intensity }) => {
            commands::set::set_static(&opts, r, g, b, intensity)?;
        }
        Some(Commands::Brightness { level }) => {
            commands::set::brightness(&opts, level)?;
        }

        // === Attributes ===
        Some(Commands::Attr(AttrCommands::List)) => {
            commands::attr::list(&opts)?;
        }
        Some(Commands::Attr(AttrCommands::Read { name })) => {
            commands::attr::read(&opts, &name)?;
        }
        Some(Commands::Attr(AttrCommands::Write { name, bytes })) => {
            commands::attr::write(&opts, &name, &bytes)?;
        }
    }

    Ok(())
}
