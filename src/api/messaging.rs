use anyhow::Result;

use super::models::{Page, PageRequest};
use super::BaasClient;

impl BaasClient {
    pub async fn list_topics(&self, page: PageRequest) -> Result<Page> {
        self.list_page("/messaging/topics", "topics", page).await
    }
}
