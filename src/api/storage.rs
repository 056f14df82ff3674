use anyhow::Result;

use super::models::{Page, PageRequest};
use super::BaasClient;

impl BaasClient {
    pub async fn list_buckets(&self, page: PageRequest) -> Result<Page> {
        self.list_page("/storage/buckets", "buckets", page).await
    }
}
