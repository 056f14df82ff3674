use anyhow::Result;

use super::models::{Page, PageRequest};
use super::BaasClient;

impl BaasClient {
    pub async fn list_teams(&self, page: PageRequest) -> Result<Page> {
        self.list_page("/teams", "teams", page).await
    }
}
