use clap::Parser;
use std::process;
use taskboard::TaskboardConfig;

mod cli;
mod commands;
mod exit_codes;

use cli::{Cli, Commands};
use exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let exit_code = match run(cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("Error: {e:#}");
            EXIT_ERROR
        }
    };
    process::exit(exit_code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_cli_configuration(&cli)?;

    match cli.command {
        Commands::Login {
            email,
            password,
            provider,
        } => commands::session::login(&config, email, password, provider, cli.format).await,
        Commands::Logout => commands::session::logout(&config).await,
        Commands::Status => commands::session::status(&config, cli.format).await,
        Commands::Labels => commands::labels::list(&config, cli.format),
        Commands::Board => commands::board::run(&config).await,
    }
}

/// Load configuration from defaults, the config file and the environment.
///
/// An explicit `--config` that cannot be read is an error; a broken file
/// found by discovery only costs a warning.
fn load_cli_configuration(cli: &Cli) -> anyhow::Result<TaskboardConfig> {
    if let Some(path) = &cli.config {
        return TaskboardConfig::load(Some(path.as_path()))
            .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()));
    }

    match TaskboardConfig::load(None) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!("Failed to load configuration: {}", e);
            eprintln!("Warning: Configuration loading failed: {}", e);
            eprintln!("Continuing with default configuration...");
            Ok(TaskboardConfig::default())
        }
    }
}

fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let log_level = if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taskboard={log_level},{log_level}")));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
