use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Page, PageRequest, Resource};
use super::BaasClient;

/// The remote operations the pull engine consumes.
///
/// `BaasClient` is the HTTP implementation; tests substitute in-memory fakes.
#[async_trait]
pub trait Remote: Send + Sync {
    async fn get_project(&self, project_id: &str) -> Result<Resource>;

    async fn list_functions(&self, page: PageRequest) -> Result<Page>;

    async fn list_databases(&self, page: PageRequest) -> Result<Page>;

    async fn get_database(&self, database_id: &str) -> Result<Resource>;

    async fn list_collections(&self, database_id: &str, page: PageRequest) -> Result<Page>;

    async fn list_buckets(&self, page: PageRequest) -> Result<Page>;

    async fn list_teams(&self, page: PageRequest) -> Result<Page>;

    async fn list_topics(&self, page: PageRequest) -> Result<Page>;

    /// Write the deployment's code archive to `dest`.
    async fn download_deployment(
        &self,
        function_id: &str,
        deployment_id: &str,
        dest: &Path,
    ) -> Result<()>;
}

#[async_trait]
impl Remote for BaasClient {
    async fn get_project(&self, project_id: &str) -> Result<Resource> {
        BaasClient::get_project(self, project_id).await
    }

    async fn list_functions(&self, page: PageRequest) -> Result<Page> {
        BaasClient::list_functions(self, page).await
    }

    async fn list_databases(&self, page: PageRequest) -> Result<Page> {
        BaasClient::list_databases(self, page).await
    }

    async fn get_database(&self, database_id: &str) -> Result<Resource> {
        BaasClient::get_database(self, database_id).await
    }

    async fn list_collections(&self, database_id: &str, page: PageRequest) -> Result<Page> {
        BaasClient::list_collections(self, database_id, page).await
    }

    async fn list_buckets(&self, page: PageRequest) -> Result<Page> {
        BaasClient::list_buckets(self, page).await
    }

    async fn list_teams(&self, page: PageRequest) -> Result<Page> {
        BaasClient::list_teams(self, page).await
    }

    async fn list_topics(&self, page: PageRequest) -> Result<Page> {
        BaasClient::list_topics(self, page).await
    }

    async fn download_deployment(
        &self,
        function_id: &str,
        deployment_id: &str,
        dest: &Path,
    ) -> Result<()> {
        BaasClient::download_deployment(self, function_id, deployment_id, dest).await
    }
}
