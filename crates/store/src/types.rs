//! Wire types shared by every management-store backend.
//!
//! Field names use `camelCase` on the wire via
//! `#[serde(rename_all = "camelCase")]`; object *property* names are
//! provider-defined PascalCase strings and pass through untouched inside
//! the `properties` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sw_domain::error::{Error, Result};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Managed object
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A handle to one instance of a provider class.
///
/// `path` is the store-assigned identity (`None` until the object has
/// been persisted with `put`); `properties` is the provider-defined
/// property bag. Mutating `properties` changes only this handle — the
/// store sees nothing until the object is `put` back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedObject {
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl ManagedObject {
    /// A new, empty, un-persisted instance of `class`.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            path: None,
            properties: Map::new(),
        }
    }

    /// An un-persisted instance pre-populated with every property the
    /// schema names, each set to `null`.
    pub fn from_schema(schema: &ClassSchema) -> Self {
        let mut obj = Self::new(schema.class.clone());
        for name in &schema.properties {
            obj.properties.insert(name.clone(), Value::Null);
        }
        obj
    }

    /// Set a property, converting any JSON-compatible value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.properties.insert(name.to_owned(), value.into());
    }

    /// Read a property; `None` when absent or JSON `null`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.properties.get(name) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_u32(&self, name: &str) -> Option<u32> {
        self.get(name)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    // ── fallible accessors ───────────────────────────────────────────

    /// Like [`get_str`](Self::get_str) but a missing or mistyped value
    /// is a [`Error::Parse`] naming the class and property.
    pub fn require_str(&self, name: &str) -> Result<&str> {
        self.get_str(name)
            .ok_or_else(|| self.missing(name, "string"))
    }

    pub fn require_i64(&self, name: &str) -> Result<i64> {
        self.get_i64(name)
            .ok_or_else(|| self.missing(name, "integer"))
    }

    pub fn require_u32(&self, name: &str) -> Result<u32> {
        self.get_u32(name)
            .ok_or_else(|| self.missing(name, "unsigned integer"))
    }

    pub fn require_bool(&self, name: &str) -> Result<bool> {
        self.get_bool(name)
            .ok_or_else(|| self.missing(name, "boolean"))
    }

    /// The store-assigned path, or [`Error::NotFound`] when the object
    /// was never persisted.
    pub fn require_path(&self) -> Result<&str> {
        self.path.as_deref().ok_or_else(|| {
            Error::NotFound(format!("{} instance has no store path", self.class))
        })
    }

    fn missing(&self, name: &str, expected: &str) -> Error {
        Error::Parse(format!(
            "{}.{name}: missing or not a {expected}",
            self.class
        ))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request / response DTOs
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// GET /sites/{site}/schema/{class} — response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchema {
    pub class: String,
    pub properties: Vec<String>,
}

/// POST /sites/{site}/query — request body.
///
/// `filter` is an exact-match conjunction: every listed property must
/// equal the given value. An empty filter selects the whole class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub class: String,
    #[serde(default)]
    pub filter: Map<String, Value>,
}

impl QueryRequest {
    /// Select every instance of `class`.
    pub fn all(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            filter: Map::new(),
        }
    }

    /// Add one exact-match condition.
    pub fn with(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.filter.insert(property.to_owned(), value.into());
        self
    }
}

/// POST /sites/{site}/query — response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub instances: Vec<ManagedObject>,
    pub count: u32,
}

/// PUT /sites/{site}/objects — response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutResponse {
    pub path: String,
}

/// POST /sites/{site}/objects/{path}/exec/{method} — request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecRequest {
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl ExecRequest {
    pub fn with(mut self, param: &str, value: impl Into<Value>) -> Self {
        self.params.insert(param.to_owned(), value.into());
        self
    }
}

/// POST /sites/{site}/objects/{path}/exec/{method} — response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecResponse {
    pub return_value: i64,
    #[serde(default)]
    pub out: Map<String, Value>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
