use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Records ──

/// A record returned by any list or get endpoint.
///
/// Only `$id` is interpreted; every other attribute is carried through
/// untouched so the local project file mirrors what the server sent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Resource {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Resource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style setter, mostly useful for fixtures.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Active deployment of a function; empty strings count as none.
    pub fn deployment(&self) -> Option<&str> {
        self.str_field("deployment").filter(|d| !d.is_empty())
    }

    /// Name if present, otherwise the id.
    pub fn label(&self) -> &str {
        self.name().unwrap_or(&self.id)
    }
}

// ── Pagination ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Query-string pairs in the server's JSON query syntax.
    pub fn queries(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "queries[]",
                serde_json::json!({ "method": "limit", "values": [self.limit] }).to_string(),
            ),
            (
                "queries[]",
                serde_json::json!({ "method": "offset", "values": [self.offset] }).to_string(),
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Resource>,
    pub total: u64,
}

impl Page {
    /// Split a list response (`{"total": n, "<wrapper>": [...]}`) into a page.
    pub fn from_list_response(mut body: Value, wrapper: &str) -> anyhow::Result<Self> {
        let total = body
            .get("total")
            .and_then(Value::as_u64)
            .ok_or_else(|| anyhow::anyhow!("List response is missing 'total'"))?;
        let items = match body.get_mut(wrapper).map(Value::take) {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<Resource>, _>>()
                .map_err(|e| anyhow::anyhow!("Malformed '{}' entry: {}", wrapper, e))?,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => anyhow::bail!("Expected '{}' to be an array, got {}", wrapper, other),
        };
        Ok(Self { items, total })
    }
}
