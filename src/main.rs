use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use baasync::cli::{Cli, Commands, LogLevel};
use baasync::commands;

fn setup_logging(level: LogLevel) {
    let Some(filter) = level.as_filter() else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("baasync={}", filter)))
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    tracing::debug!("baasync started with log level: {:?}", level);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level);

    match &cli.command {
        Commands::Init {
            project_id,
            project_name,
        } => commands::init::run(&cli, project_id, project_name.clone()),
        Commands::Pull {
            resource,
            all,
            ids,
            no_code,
        } => commands::pull::run(&cli, *resource, *all, ids.clone(), *no_code).await,
        Commands::List { resource } => commands::list::run(&cli, *resource).await,
    }
}
