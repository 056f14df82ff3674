use anyhow::{Context, Result};

use super::models::{Page, PageRequest, Resource};
use super::BaasClient;

impl BaasClient {
    pub async fn list_databases(&self, page: PageRequest) -> Result<Page> {
        self.list_page("/databases", "databases", page).await
    }

    pub async fn get_database(&self, database_id: &str) -> Result<Resource> {
        let body = self
            .get_json(&format!("/databases/{}", database_id), &[])
            .await?;
        serde_json::from_value(body)
            .with_context(|| format!("Malformed database '{}'", database_id))
    }

    pub async fn list_collections(&self, database_id: &str, page: PageRequest) -> Result<Page> {
        self.list_page(
            &format!("/databases/{}/collections", database_id),
            "collections",
            page,
        )
        .await
    }
}
