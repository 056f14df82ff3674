use anyhow::{Context, Result};

use super::models::Resource;
use super::BaasClient;

impl BaasClient {
    pub async fn get_project(&self, project_id: &str) -> Result<Resource> {
        let body = self.get_json(&format!("/projects/{}", project_id), &[]).await?;
        serde_json::from_value(body)
            .with_context(|| format!("Malformed project '{}'", project_id))
    }
}
