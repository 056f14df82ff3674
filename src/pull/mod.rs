pub mod cancel;
pub mod fetch;
pub mod materialize;
pub mod paginate;
pub mod reconcile;
pub mod select;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use colored::Colorize;

use crate::api::Remote;
use crate::prompt::SelectionProvider;
use crate::store::LocalStore;

pub use cancel::CancelFlag;
use fetch::Fetcher;
use materialize::materialize;
use select::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Project,
    Functions,
    Collections,
    Buckets,
    Teams,
    Topics,
}

impl Category {
    /// Order used by `pull all`: the project first, so everything after it
    /// runs against an established project identity.
    pub const ORDERED: [Category; 6] = [
        Category::Project,
        Category::Functions,
        Category::Collections,
        Category::Buckets,
        Category::Teams,
        Category::Topics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Project => "project",
            Category::Functions => "functions",
            Category::Collections => "collections",
            Category::Buckets => "buckets",
            Category::Teams => "teams",
            Category::Topics => "topics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single `pull` invocation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullTarget {
    All,
    One(Category),
    /// Ask the selection provider which category to pull.
    Ask,
}

#[derive(Debug, Clone)]
pub struct PullOptions {
    /// Pull every remote item instead of prompting.
    pub bulk: bool,
    /// Databases to pull collections from when not in bulk mode.
    pub database_ids: Vec<String>,
    /// Download and extract function code.
    pub code: bool,
    pub page_size: u64,
}

impl Default for PullOptions {
    fn default() -> Self {
        Self {
            bulk: false,
            database_ids: Vec::new(),
            code: true,
            page_size: 100,
        }
    }
}

pub struct Puller<'a> {
    remote: &'a dyn Remote,
    selector: &'a dyn SelectionProvider,
    store: &'a mut LocalStore,
    project_file: PathBuf,
    options: PullOptions,
    cancel: CancelFlag,
}

impl<'a> Puller<'a> {
    pub fn new(
        remote: &'a dyn Remote,
        selector: &'a dyn SelectionProvider,
        store: &'a mut LocalStore,
        project_file: &Path,
        options: PullOptions,
    ) -> Self {
        Self {
            remote,
            selector,
            store,
            project_file: project_file.to_path_buf(),
            options,
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    fn base_dir(&self) -> &Path {
        self.project_file.parent().unwrap_or(Path::new("."))
    }

    fn fetcher(&self) -> Fetcher<'a> {
        Fetcher::new(self.remote, self.options.page_size, self.cancel.clone())
    }

    /// Categories run one after another; the project file is written after
    /// each one completes, so a later failure keeps earlier categories.
    pub async fn run(&mut self, target: PullTarget) -> Result<()> {
        let target = match target {
            PullTarget::Ask => match self.selector.choose_category()? {
                Some(category) => PullTarget::One(category),
                None => PullTarget::All,
            },
            other => other,
        };

        match target {
            PullTarget::One(category) => self.pull_category(category).await,
            PullTarget::All | PullTarget::Ask => {
                for category in Category::ORDERED {
                    self.pull_category(category).await?;
                }
                Ok(())
            }
        }
    }

    pub async fn pull_category(&mut self, category: Category) -> Result<()> {
        self.cancel.check()?;
        tracing::info!(%category, "pulling");

        let outcome = match category {
            Category::Project => self.pull_project().await,
            Category::Functions => self.pull_functions().await,
            Category::Collections => self.pull_collections().await,
            Category::Buckets => self.pull_buckets().await,
            Category::Teams => self.pull_teams().await,
            Category::Topics => self.pull_topics().await,
        };

        // Functions report per-function failures after the rest were reconciled.
        let keep_partial = category == Category::Functions && !self.cancel.is_cancelled();
        if outcome.is_ok() || keep_partial {
            self.store.save(&self.project_file)?;
        }
        outcome
    }

    async fn pull_project(&mut self) -> Result<()> {
        let Some((project_id, _)) = self.store.project() else {
            bail!(
                "{} has no projectId. Run `baasync init --project-id <ID>` first.",
                self.project_file.display()
            );
        };
        let project_id = project_id.to_string();

        println!("Fetching project {} ...", project_id);
        let project = self.fetcher().project(&project_id).await?;
        reconcile::reconcile_project(self.store, project);

        println!(
            "{} Pulled project {}",
            "✓".green(),
            self.store
                .project_name
                .as_deref()
                .unwrap_or(&project_id)
                .bold()
        );
        Ok(())
    }

    async fn pull_functions(&mut self) -> Result<()> {
        let scope = Scope::resolve(self.options.bulk, &[]);
        let functions = self.fetcher().functions(&scope, self.selector).await?;
        println!("Found {} functions", functions.len());

        let base_dir = self.base_dir().to_path_buf();
        let count = functions.len();
        let mut failed = Vec::new();

        for function in functions {
            self.cancel.check()?;
            println!("  {} Pulling function {} ...", "↓".cyan(), function.label());
            let entry = reconcile::reconcile_function(self.store, function);

            if !self.options.code {
                continue;
            }
            match materialize(self.remote, &base_dir, &entry).await {
                Ok(Some(extraction)) => {
                    println!(
                        "  {} Extracted {} files into {}",
                        "✓".green(),
                        extraction.files,
                        entry.path
                    );
                    if extraction.skipped > 0 {
                        println!(
                            "  {} Skipped {} archive entries",
                            "!".yellow(),
                            extraction.skipped
                        );
                    }
                }
                Ok(None) => {
                    tracing::debug!(function = %entry.id, "no active deployment, code not downloaded");
                }
                Err(e) => {
                    println!("  {} {}: {:#}", "✗".red(), entry.id, e);
                    failed.push(entry.id);
                }
            }
        }

        if !failed.is_empty() {
            bail!(
                "Failed to pull code for {} of {} functions: {}",
                failed.len(),
                count,
                failed.join(", ")
            );
        }

        println!("{} Pulled {} functions", "✓".green(), count);
        Ok(())
    }

    async fn pull_collections(&mut self) -> Result<()> {
        let scope = Scope::resolve(self.options.bulk, &self.options.database_ids);
        let fetcher = self.fetcher();
        let database_ids = fetcher.database_ids(&scope, self.selector).await?;

        let mut count = 0;
        for database_id in &database_ids {
            println!("Fetching database {} ...", database_id);
            let (database, collections) = fetcher.database_with_collections(database_id).await?;
            reconcile::reconcile_database(self.store, database);

            if !collections.items.is_empty() {
                println!("Found {} collections", collections.items.len());
            }
            for collection in collections.items {
                println!("  Fetching {} ...", collection.label());
                reconcile::reconcile_collection(self.store, database_id, collection);
                count += 1;
            }
        }

        println!(
            "{} Pulled {} collections from {} databases",
            "✓".green(),
            count,
            database_ids.len()
        );
        Ok(())
    }

    async fn pull_buckets(&mut self) -> Result<()> {
        let buckets = self.fetcher().all_buckets().await?;
        println!("Found {} buckets", buckets.items.len());
        let count = buckets.items.len();
        for bucket in buckets.items {
            println!("  Fetching {} ...", bucket.label());
            reconcile::reconcile_bucket(self.store, bucket);
        }
        println!("{} Pulled {} buckets", "✓".green(), count);
        Ok(())
    }

    async fn pull_teams(&mut self) -> Result<()> {
        let teams = self.fetcher().all_teams().await?;
        println!("Found {} teams", teams.items.len());
        let count = teams.items.len();
        for team in teams.items {
            println!("  Fetching {} ...", team.label());
            reconcile::reconcile_team(self.store, team);
        }
        println!("{} Pulled {} teams", "✓".green(), count);
        Ok(())
    }

    async fn pull_topics(&mut self) -> Result<()> {
        let topics = self.fetcher().all_topics().await?;
        println!("Found {} topics", topics.items.len());
        let count = topics.items.len();
        for topic in topics.items {
            println!("  Fetching {} ...", topic.label());
            reconcile::reconcile_topic(self.store, topic);
        }
        println!("{} Pulled {} topics", "✓".green(), count);
        Ok(())
    }
}
