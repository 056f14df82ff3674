//! Upsert freshly fetched resources into the local project file.
//!
//! Server-managed fields that change without any user edit (timestamps,
//! counters, preference blobs) are dropped before persisting. Pulling an
//! unchanged project twice leaves the file byte-identical.

use serde_json::{Map, Value};

use super::Category;
use crate::api::models::Resource;
use crate::store::{CollectionEntry, FunctionEntry, LocalStore, Record};

const TIMESTAMPS: &[&str] = &["$createdAt", "$updatedAt"];
const TEAM_VOLATILE: &[&str] = &["$createdAt", "$updatedAt", "total", "prefs"];
const TOPIC_VOLATILE: &[&str] = &["$createdAt", "$updatedAt", "emailTotal", "smsTotal", "pushTotal"];
// Variables hold secrets and are never written to the project file.
const FUNCTION_VOLATILE: &[&str] = &["$createdAt", "$updatedAt", "vars"];

pub fn volatile_fields(category: Category) -> &'static [&'static str] {
    match category {
        Category::Teams => TEAM_VOLATILE,
        Category::Topics => TOPIC_VOLATILE,
        Category::Functions => FUNCTION_VOLATILE,
        Category::Project | Category::Collections | Category::Buckets => TIMESTAMPS,
    }
}

pub fn strip_volatile(category: Category, fields: &mut Map<String, Value>) {
    for key in volatile_fields(category) {
        fields.remove(*key);
    }
}

pub fn function_path(id: &str) -> String {
    format!("functions/{}", id)
}

pub fn reconcile_project(store: &mut LocalStore, project: Resource) {
    let Resource { id, mut fields } = project;
    strip_volatile(Category::Project, &mut fields);
    let name = fields
        .remove("name")
        .and_then(|n| n.as_str().map(str::to_string));
    store.set_project(&id, name.as_deref(), fields);
}

/// Returns the entry as persisted, for the materializer to use.
pub fn reconcile_function(store: &mut LocalStore, function: Resource) -> FunctionEntry {
    let Resource { id, mut fields } = function;
    strip_volatile(Category::Functions, &mut fields);
    fields.remove("path");

    match store.function(&id).map(|existing| existing.path.clone()) {
        Some(path) => {
            let entry = FunctionEntry { id, path, fields };
            store.update_function(&entry.id, entry.clone());
            entry
        }
        None => {
            let path = function_path(&id);
            let entry = FunctionEntry { id, path, fields };
            store.add_function(entry.clone());
            entry
        }
    }
}

pub fn reconcile_database(store: &mut LocalStore, database: Resource) {
    store.add_database(stripped(Category::Collections, database));
}

pub fn reconcile_collection(store: &mut LocalStore, database_id: &str, collection: Resource) {
    let Resource { id, mut fields } = collection;
    strip_volatile(Category::Collections, &mut fields);
    fields.remove("databaseId");
    store.add_collection(CollectionEntry {
        id,
        database_id: database_id.to_string(),
        fields,
    });
}

fn stripped(category: Category, resource: Resource) -> Record {
    let Resource { id, mut fields } = resource;
    strip_volatile(category, &mut fields);
    Record { id, fields }
}

pub fn reconcile_bucket(store: &mut LocalStore, bucket: Resource) {
    store.add_bucket(stripped(Category::Buckets, bucket));
}

pub fn reconcile_team(store: &mut LocalStore, team: Resource) {
    store.add_team(stripped(Category::Teams, team));
}

pub fn reconcile_topic(store: &mut LocalStore, topic: Resource) {
    store.add_topic(stripped(Category::Topics, topic));
}
