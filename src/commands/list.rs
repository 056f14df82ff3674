use anyhow::Result;
use colored::Colorize;

use super::{connect, load_config};
use crate::api::models::Resource;
use crate::cli::{Cli, ListResource};
use crate::pull::fetch::Fetcher;
use crate::pull::CancelFlag;
use crate::store::LocalStore;

pub async fn run(cli: &Cli, resource: ListResource) -> Result<()> {
    let config = load_config(cli)?;
    let store = LocalStore::load(&cli.project_file)?;
    let client = connect(cli, &config, &store)?;
    let fetcher = Fetcher::new(&client, config.pull.page_size, CancelFlag::new());

    let (title, detail, page) = match resource {
        ListResource::Functions => ("Functions", "runtime", fetcher.all_functions().await?),
        ListResource::Databases => ("Databases", "enabled", fetcher.all_databases().await?),
        ListResource::Buckets => ("Buckets", "enabled", fetcher.all_buckets().await?),
        ListResource::Teams => ("Teams", "total", fetcher.all_teams().await?),
        ListResource::Topics => ("Topics", "emailTotal", fetcher.all_topics().await?),
    };

    println!("{}", title.bold());
    println!("{:<24} {:<30} {}", "ID", "Name", detail);
    println!("{}", "-".repeat(70));
    for item in &page.items {
        println!(
            "{:<24} {:<30} {}",
            item.id,
            item.name().unwrap_or("-"),
            detail_value(item, detail)
        );
    }
    println!("\nTotal: {}", page.total);

    Ok(())
}

fn detail_value(item: &Resource, key: &str) -> String {
    match item.fields.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Bool(b)) => String::from(if *b { "Yes" } else { "No" }),
        Some(serde_json::Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}
