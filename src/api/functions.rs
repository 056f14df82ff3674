use std::path::Path;

use anyhow::Result;

use super::models::{Page, PageRequest};
use super::BaasClient;

impl BaasClient {
    pub async fn list_functions(&self, page: PageRequest) -> Result<Page> {
        self.list_page("/functions", "functions", page).await
    }

    /// Download the packaged code of a deployment as a gzip tarball.
    pub async fn download_deployment(
        &self,
        function_id: &str,
        deployment_id: &str,
        dest: &Path,
    ) -> Result<()> {
        let path = format!(
            "/functions/{}/deployments/{}/download",
            function_id, deployment_id
        );
        self.download_to(&path, dest).await
    }
}
