#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;

use baasync::api::models::{Page, PageRequest, Resource};
use baasync::api::Remote;
use baasync::prompt::SelectionProvider;
use baasync::pull::Category;

/// In-memory remote that records every call it receives.
#[derive(Default)]
pub struct FakeRemote {
    pub project: Option<Resource>,
    pub functions: Vec<Resource>,
    pub databases: Vec<Resource>,
    pub collections: HashMap<String, Vec<Resource>>,
    pub buckets: Vec<Resource>,
    pub teams: Vec<Resource>,
    pub topics: Vec<Resource>,
    /// Deployment id -> gzip tarball bytes
    pub archives: HashMap<String, Vec<u8>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRemote {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

fn page_of(items: &[Resource], req: PageRequest) -> Page {
    let start = (req.offset as usize).min(items.len());
    let end = (start + req.limit as usize).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        total: items.len() as u64,
    }
}

#[async_trait]
impl Remote for FakeRemote {
    async fn get_project(&self, project_id: &str) -> Result<Resource> {
        self.record("get_project");
        self.project
            .clone()
            .filter(|p| p.id == project_id)
            .ok_or_else(|| anyhow!("project {} not found", project_id))
    }

    async fn list_functions(&self, page: PageRequest) -> Result<Page> {
        self.record("list_functions");
        Ok(page_of(&self.functions, page))
    }

    async fn list_databases(&self, page: PageRequest) -> Result<Page> {
        self.record("list_databases");
        Ok(page_of(&self.databases, page))
    }

    async fn get_database(&self, database_id: &str) -> Result<Resource> {
        self.record(format!("get_database:{}", database_id));
        self.databases
            .iter()
            .find(|d| d.id == database_id)
            .cloned()
            .ok_or_else(|| anyhow!("database {} not found", database_id))
    }

    async fn list_collections(&self, database_id: &str, page: PageRequest) -> Result<Page> {
        self.record(format!("list_collections:{}", database_id));
        let items = self
            .collections
            .get(database_id)
            .cloned()
            .unwrap_or_default();
        Ok(page_of(&items, page))
    }

    async fn list_buckets(&self, page: PageRequest) -> Result<Page> {
        self.record("list_buckets");
        Ok(page_of(&self.buckets, page))
    }

    async fn list_teams(&self, page: PageRequest) -> Result<Page> {
        self.record("list_teams");
        Ok(page_of(&self.teams, page))
    }

    async fn list_topics(&self, page: PageRequest) -> Result<Page> {
        self.record("list_topics");
        Ok(page_of(&self.topics, page))
    }

    async fn download_deployment(
        &self,
        function_id: &str,
        deployment_id: &str,
        dest: &Path,
    ) -> Result<()> {
        self.record(format!("download:{}:{}", function_id, deployment_id));
        let bytes = self
            .archives
            .get(deployment_id)
            .ok_or_else(|| anyhow!("API error 404 Not Found: deployment {}", deployment_id))?;
        std::fs::write(dest, bytes)?;
        Ok(())
    }
}

/// Canned answers; records which questions were asked.
#[derive(Default)]
pub struct Scripted {
    pub category: Option<Category>,
    pub function_ids: Vec<String>,
    pub database_ids: Vec<String>,
    pub asked: RefCell<Vec<&'static str>>,
}

impl SelectionProvider for Scripted {
    fn choose_category(&self) -> Result<Option<Category>> {
        self.asked.borrow_mut().push("category");
        Ok(self.category)
    }

    fn choose_functions(&self, available: &[Resource]) -> Result<Vec<Resource>> {
        self.asked.borrow_mut().push("functions");
        Ok(available
            .iter()
            .filter(|f| self.function_ids.contains(&f.id))
            .cloned()
            .collect())
    }

    fn choose_databases(&self, _available: &[Resource]) -> Result<Vec<String>> {
        self.asked.borrow_mut().push("databases");
        Ok(self.database_ids.clone())
    }
}

/// Gzip tarball holding `files` at the archive root.
pub fn tarball(files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

pub fn function(id: &str, deployment: &str) -> Resource {
    Resource::new(id)
        .with("name", format!("fn {}", id))
        .with("runtime", "node-18.0")
        .with("deployment", deployment)
        .with("$createdAt", "2024-01-01T00:00:00.000+00:00")
        .with("$updatedAt", "2024-01-02T00:00:00.000+00:00")
}

pub fn named(id: &str, name: &str) -> Resource {
    Resource::new(id)
        .with("name", name)
        .with("$createdAt", "2024-01-01T00:00:00.000+00:00")
        .with("$updatedAt", "2024-01-02T00:00:00.000+00:00")
}

/// Every category populated with a little data.
pub fn populated_remote() -> FakeRemote {
    let mut collections = HashMap::new();
    collections.insert(
        "db1".to_string(),
        vec![
            named("users", "Users").with("databaseId", "db1"),
            named("posts", "Posts").with("databaseId", "db1"),
        ],
    );
    collections.insert(
        "db2".to_string(),
        vec![named("orders", "Orders").with("databaseId", "db2")],
    );

    let mut archives = HashMap::new();
    archives.insert(
        "dep1".to_string(),
        tarball(&[("main.js", "export default () => 1;"), ("package.json", "{}")]),
    );

    FakeRemote {
        project: Some(named("proj", "My Project").with("teamId", "team1")),
        functions: vec![function("fn1", "dep1"), function("fn2", "")],
        databases: vec![named("db1", "Main"), named("db2", "Shop")],
        collections,
        buckets: vec![named("avatars", "Avatars").with("maximumFileSize", 30000000)],
        teams: vec![named("team1", "Admins")
            .with("total", 3)
            .with("prefs", serde_json::json!({ "theme": "dark" }))],
        topics: vec![named("news", "News")
            .with("emailTotal", 10)
            .with("smsTotal", 0)
            .with("pushTotal", 2)],
        archives,
        calls: Mutex::new(Vec::new()),
    }
}
