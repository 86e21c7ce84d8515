//! Roadrisk CLI - Road accident risk assessment from the command line.

use clap::Parser;
use roadrisk_cli::commands;
use roadrisk_cli::repl;
use roadrisk_cli::{Cli, CliError, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> roadrisk_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;

    init_logging(cli.log_level.as_deref().unwrap_or(&config.settings.log_level))?;

    // Override profile for this invocation only
    if let Some(profile_name) = cli.profile {
        config.use_profile_once(profile_name)?;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut config, &formatter).await?;
        }
        Some(Command::Predict(args)) => {
            commands::execute_predict(args, &config, &formatter).await?;
        }
        Some(Command::Classify(args)) => {
            commands::execute_classify(args, &formatter)?;
        }
        Some(Command::Resolve(args)) => {
            commands::execute_resolve(args, &mut config, &formatter)?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the configured filter.
fn init_logging(fallback: &str) -> roadrisk_cli::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| CliError::Logging(format!("invalid log filter '{}': {}", fallback, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
