pub mod databases;
pub mod functions;
pub mod messaging;
pub mod models;
pub mod projects;
pub mod remote;
pub mod storage;
pub mod teams;

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use models::{Page, PageRequest};

pub use remote::Remote;

pub struct BaasClient {
    pub client: Client,
    pub endpoint: String,
    pub project_id: String,
    pub api_key: Option<String>,
}

impl BaasClient {
    pub fn new(
        endpoint: &str,
        project_id: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Attach the project and credential headers every endpoint expects.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Response-Format", "1.5.0");
        match &self.api_key {
            Some(key) => request.header("X-Appwrite-Key", key),
            None => request,
        }
    }

    pub async fn execute_with_retry<F, Fut>(&self, mut make_request: F) -> Result<Response>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<Response>>,
    {
        let max_retries = 3;
        let mut attempt = 0;

        loop {
            let response = make_request().await?;
            let status = response.status();

            if status.is_success() || status == StatusCode::NO_CONTENT {
                return Ok(response);
            }

            let should_retry = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();

            if !should_retry || attempt >= max_retries {
                let body = response.text().await.unwrap_or_default();
                bail!("API error {}: {}", status, body);
            }

            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let delay = retry_after.unwrap_or(1 << attempt);
            tracing::debug!(%status, delay, attempt, "retrying request");
            tokio::time::sleep(Duration::from_secs(delay)).await;
            attempt += 1;
        }
    }

    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .execute_with_retry(|| async {
                Ok(self
                    .authorize(self.client.get(&url))
                    .query(query)
                    .send()
                    .await?)
            })
            .await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| anyhow::anyhow!("Failed to parse response: {}\nBody: {}", e, body))
    }

    /// Fetch one page of a list endpoint whose items live under `wrapper`.
    pub async fn list_page(&self, path: &str, wrapper: &str, page: PageRequest) -> Result<Page> {
        let body = self.get_json(path, &page.queries()).await?;
        Page::from_list_response(body, wrapper)
            .with_context(|| format!("Unexpected response from {}", path))
    }

    /// Stream a binary endpoint into `dest`.
    pub async fn download_to(&self, path: &str, dest: &Path) -> Result<()> {
        let url = self.url(path);
        tracing::debug!(%url, dest = %dest.display(), "download");
        let response = self
            .execute_with_retry(|| async {
                Ok(self.authorize(self.client.get(&url)).send().await?)
            })
            .await?;
        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        Ok(())
    }
}
