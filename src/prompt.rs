use anyhow::{bail, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{MultiSelect, Select};

use crate::api::models::Resource;
use crate::pull::Category;

/// Answers the questions a pull asks when no bulk flag or ids were given.
pub trait SelectionProvider {
    /// Pick a category to pull; `None` means every category.
    fn choose_category(&self) -> Result<Option<Category>>;

    /// Pick functions out of the remote listing.
    fn choose_functions(&self, available: &[Resource]) -> Result<Vec<Resource>>;

    /// Pick databases whose collections should be pulled; returns their ids.
    fn choose_databases(&self, available: &[Resource]) -> Result<Vec<String>>;
}

/// Terminal prompts.
pub struct InteractivePrompt;

fn labels(resources: &[Resource]) -> Vec<String> {
    resources
        .iter()
        .map(|r| format!("{} ({})", r.label(), r.id))
        .collect()
}

impl SelectionProvider for InteractivePrompt {
    fn choose_category(&self) -> Result<Option<Category>> {
        let mut items = vec!["all".to_string()];
        items.extend(Category::ORDERED.iter().map(|c| c.to_string()));

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to pull?")
            .items(&items)
            .default(0)
            .interact()?;

        Ok(match choice {
            0 => None,
            n => Some(Category::ORDERED[n - 1]),
        })
    }

    fn choose_functions(&self, available: &[Resource]) -> Result<Vec<Resource>> {
        if available.is_empty() {
            return Ok(Vec::new());
        }
        let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Which functions would you like to pull? (space to select)")
            .items(&labels(available))
            .interact()?;
        Ok(chosen.into_iter().map(|i| available[i].clone()).collect())
    }

    fn choose_databases(&self, available: &[Resource]) -> Result<Vec<String>> {
        if available.is_empty() {
            return Ok(Vec::new());
        }
        let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Which databases would you like to pull collections from?")
            .items(&labels(available))
            .interact()?;
        Ok(chosen
            .into_iter()
            .map(|i| available[i].id.clone())
            .collect())
    }
}

/// Used when stdin is not a terminal: every question is an error that names
/// the flag which would have avoided it.
pub struct NonInteractive;

impl SelectionProvider for NonInteractive {
    fn choose_category(&self) -> Result<Option<Category>> {
        bail!("A resource is required in non-interactive mode (e.g. `baasync pull all`)")
    }

    fn choose_functions(&self, _available: &[Resource]) -> Result<Vec<Resource>> {
        bail!("Selecting functions requires a terminal; pass --all to pull every function")
    }

    fn choose_databases(&self, _available: &[Resource]) -> Result<Vec<String>> {
        bail!("Selecting databases requires a terminal; pass --all or --id <DATABASE_ID>")
    }
}
