pub mod init;
pub mod list;
pub mod pull;

use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::api::BaasClient;
use crate::cli::Cli;
use crate::config::Config;
use crate::store::LocalStore;

/// Config file values with command-line overrides applied.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(&cli.config)?;
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Client bound to the project recorded in the project file.
pub fn connect(cli: &Cli, config: &Config, store: &LocalStore) -> Result<BaasClient> {
    let (project_id, _) = store.project().ok_or_else(|| {
        anyhow!(
            "{} has no projectId. Run `baasync init --project-id <ID>` first.",
            cli.project_file.display()
        )
    })?;
    BaasClient::new(
        &config.endpoint,
        project_id,
        cli.api_key.clone(),
        Duration::from_secs(config.pull.timeout_secs),
    )
}
