use anyhow::{Context, Result};

use super::cancel::CancelFlag;
use super::paginate::paginate;
use super::select::Scope;
use crate::api::models::{Page, Resource};
use crate::api::Remote;
use crate::prompt::SelectionProvider;

/// Read-only retrieval for each category. Output keeps remote listing order.
pub struct Fetcher<'a> {
    remote: &'a dyn Remote,
    page_size: u64,
    cancel: CancelFlag,
}

impl<'a> Fetcher<'a> {
    pub fn new(remote: &'a dyn Remote, page_size: u64, cancel: CancelFlag) -> Self {
        Self {
            remote,
            page_size,
            cancel,
        }
    }

    pub async fn project(&self, project_id: &str) -> Result<Resource> {
        self.cancel.check()?;
        self.remote
            .get_project(project_id)
            .await
            .with_context(|| format!("Failed to fetch project '{}'", project_id))
    }

    pub async fn all_functions(&self) -> Result<Page> {
        let remote = self.remote;
        paginate(self.page_size, &self.cancel, move |page| {
            remote.list_functions(page)
        })
        .await
        .context("Failed to list functions")
    }

    pub async fn functions(
        &self,
        scope: &Scope,
        selector: &dyn SelectionProvider,
    ) -> Result<Vec<Resource>> {
        let listed = self.all_functions().await?.items;
        match scope {
            Scope::All => Ok(listed),
            Scope::Explicit(ids) => Ok(listed
                .into_iter()
                .filter(|f| ids.contains(&f.id))
                .collect()),
            Scope::Interactive => selector.choose_functions(&listed),
        }
    }

    pub async fn all_databases(&self) -> Result<Page> {
        let remote = self.remote;
        paginate(self.page_size, &self.cancel, move |page| {
            remote.list_databases(page)
        })
        .await
        .context("Failed to list databases")
    }

    /// Databases whose collections a collections pull should cover.
    pub async fn database_ids(
        &self,
        scope: &Scope,
        selector: &dyn SelectionProvider,
    ) -> Result<Vec<String>> {
        match scope {
            Scope::Explicit(ids) => Ok(ids.clone()),
            Scope::All => Ok(self
                .all_databases()
                .await?
                .items
                .into_iter()
                .map(|d| d.id)
                .collect()),
            Scope::Interactive => {
                let listed = self.all_databases().await?.items;
                selector.choose_databases(&listed)
            }
        }
    }

    /// A database's own metadata followed by every collection inside it.
    pub async fn database_with_collections(&self, database_id: &str) -> Result<(Resource, Page)> {
        self.cancel.check()?;
        let database = self
            .remote
            .get_database(database_id)
            .await
            .with_context(|| format!("Failed to fetch database '{}'", database_id))?;

        let remote = self.remote;
        let collections = paginate(self.page_size, &self.cancel, move |page| {
            remote.list_collections(database_id, page)
        })
        .await
        .with_context(|| format!("Failed to list collections of database '{}'", database_id))?;

        Ok((database, collections))
    }

    pub async fn all_buckets(&self) -> Result<Page> {
        let remote = self.remote;
        paginate(self.page_size, &self.cancel, move |page| remote.list_buckets(page))
            .await
            .context("Failed to list buckets")
    }

    pub async fn all_teams(&self) -> Result<Page> {
        let remote = self.remote;
        paginate(self.page_size, &self.cancel, move |page| remote.list_teams(page))
            .await
            .context("Failed to list teams")
    }

    pub async fn all_topics(&self) -> Result<Page> {
        let remote = self.remote;
        paginate(self.page_size, &self.cancel, move |page| remote.list_topics(page))
            .await
            .context("Failed to list topics")
    }
}
