use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use strudel::cli::commands::{CheckCommand, ExpandCommand, ListCommand};
use strudel::cli::{Cli, Commands};

/// Logs go to stderr; stdout carries only expansion output.
fn initialize_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    match cli.command {
        Commands::Expand {
            template,
            args,
            base_dir,
            cwd,
            timeout_ms,
            config,
        } => {
            let command = ExpandCommand::new(template, args, base_dir, cwd, timeout_ms, config);
            command.execute().await?;
        }
        Commands::Check { template, config } => {
            let command = CheckCommand::new(template, config);
            command.execute().await?;
        }
        Commands::List { dir } => {
            let command = ListCommand::new(dir);
            command.execute()?;
        }
    }

    Ok(())
}
