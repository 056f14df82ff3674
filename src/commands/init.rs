use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::cli::Cli;
use crate::config::Config;
use crate::store::LocalStore;

pub fn run(cli: &Cli, project_id: &str, project_name: Option<String>) -> Result<()> {
    let config_path = &cli.config;
    let project_file = &cli.project_file;

    for path in [config_path, project_file] {
        if path.exists() {
            bail!(
                "{} already exists. Remove it first or use a different path.",
                path.display()
            );
        }
    }

    if project_id.trim().is_empty() {
        bail!("--project-id must not be empty");
    }

    std::fs::write(config_path, Config::default_template())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{} Created {}", "✓".green(), config_path.display());

    LocalStore::new(project_id, project_name).save(project_file)?;
    println!("{} Created {}", "✓".green(), project_file.display());

    println!("Set your endpoint in the config file, then run `baasync pull`.");
    Ok(())
}
