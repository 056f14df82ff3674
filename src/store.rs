use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PROJECT_FILE_NAME: &str = "baasync.json";

/// The local project file: one ordered list of entries per resource category.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalStore {
    #[serde(default)]
    pub project_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub project_settings: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub databases: Vec<Record>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<CollectionEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buckets: Vec<Record>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Record>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Record {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FunctionEntry {
    #[serde(rename = "$id")]
    pub id: String,
    /// Local directory holding the function's code, relative to the project file.
    pub path: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FunctionEntry {
    pub fn deployment(&self) -> Option<&str> {
        self.fields
            .get("deployment")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CollectionEntry {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "databaseId")]
    pub database_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Replace the entry `same` matches in place, or append.
fn upsert<T>(entries: &mut Vec<T>, entry: T, same: impl Fn(&T) -> bool) {
    match entries.iter_mut().find(|e| same(e)) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

impl LocalStore {
    pub fn new(project_id: &str, project_name: Option<String>) -> Self {
        Self {
            project_id: project_id.to_string(),
            project_name,
            ..Default::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let store: LocalStore = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(store)
    }

    /// Write through a sibling temp file and rename, so a crash mid-write
    /// never leaves a truncated project file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    // ── Project ──

    pub fn project(&self) -> Option<(&str, Option<&str>)> {
        if self.project_id.is_empty() {
            None
        } else {
            Some((&self.project_id, self.project_name.as_deref()))
        }
    }

    pub fn set_project(&mut self, id: &str, name: Option<&str>, settings: Map<String, Value>) {
        self.project_id = id.to_string();
        self.project_name = name.map(str::to_string);
        self.project_settings = settings;
    }

    // ── Functions ──

    pub fn function(&self, id: &str) -> Option<&FunctionEntry> {
        self.functions.iter().find(|f| f.id == id)
    }

    pub fn add_function(&mut self, entry: FunctionEntry) {
        let id = entry.id.clone();
        upsert(&mut self.functions, entry, |f| f.id == id);
    }

    /// Replace an existing function; returns false when `id` is unknown.
    pub fn update_function(&mut self, id: &str, entry: FunctionEntry) -> bool {
        match self.functions.iter_mut().find(|f| f.id == id) {
            Some(existing) => {
                *existing = entry;
                true
            }
            None => false,
        }
    }

    // ── Databases & collections ──

    pub fn add_database(&mut self, record: Record) {
        let id = record.id.clone();
        upsert(&mut self.databases, record, |d| d.id == id);
    }

    pub fn add_collection(&mut self, entry: CollectionEntry) {
        let id = entry.id.clone();
        let database_id = entry.database_id.clone();
        upsert(&mut self.collections, entry, |c| {
            c.id == id && c.database_id == database_id
        });
    }

    // ── Storage, teams, messaging ──

    pub fn add_bucket(&mut self, record: Record) {
        let id = record.id.clone();
        upsert(&mut self.buckets, record, |b| b.id == id);
    }

    pub fn add_team(&mut self, record: Record) {
        let id = record.id.clone();
        upsert(&mut self.teams, record, |t| t.id == id);
    }

    pub fn add_topic(&mut self, record: Record) {
        let id = record.id.clone();
        upsert(&mut self.topics, record, |t| t.id == id);
    }
}
