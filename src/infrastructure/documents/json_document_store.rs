// src/infrastructure/documents/json_document_store.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::document_store::DocumentStore;
use crate::infrastructure::error::{InfrastructureError, InfrastructureResult};

/// Document store kept in a single JSON file shaped `{table: {record_id: {field: value}}}`.
///
/// The file is created on the first write. Every update rewrites the whole
/// file; there is no version check, so concurrent writers race.
#[derive(Debug)]
pub struct JsonDocumentStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!("Creating JsonDocumentStore at {}", path.display());
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> InfrastructureResult<Map<String, Value>> {
        if !self.path.exists() {
            trace!("{} does not exist yet", self.path.display());
            return Ok(Map::new());
        }

        let text = fs::read_to_string(&self.path).map_err(|e| {
            InfrastructureError::FileSystem(format!("reading {}: {}", self.path.display(), e))
        })?;
        if text.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&text)? {
            Value::Object(tables) => Ok(tables),
            _ => Err(InfrastructureError::Serialization(format!(
                "{} must contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn save(&self, tables: &Map<String, Value>) -> InfrastructureResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                InfrastructureError::FileSystem(format!("creating {}: {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(tables)?;
        fs::write(&self.path, json).map_err(|e| {
            InfrastructureError::FileSystem(format!("writing {}: {}", self.path.display(), e))
        })
    }
}

/// The object stored under `key`, replacing any non-object value
fn object_entry<'a>(parent: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let entry = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(map) => map,
        _ => unreachable!("entry was just replaced by an object"),
    }
}

impl DocumentStore for JsonDocumentStore {
    #[instrument(skip(self), level = "debug")]
    fn get_field(&self, table: &str, record_id: &str, field: &str) -> DomainResult<Value> {
        let tables = self.load()?;
        Ok(tables
            .get(table)
            .and_then(|records| records.get(record_id))
            .and_then(|record| record.get(field))
            .cloned()
            .unwrap_or(Value::Null))
    }

    #[instrument(skip(self, value), level = "debug")]
    fn update_field(
        &self,
        table: &str,
        record_id: &str,
        field: &str,
        value: Value,
    ) -> DomainResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| DomainError::Document(format!("document store lock poisoned: {}", e)))?;

        let mut tables = self.load()?;
        let records = object_entry(&mut tables, table);
        let record = object_entry(records, record_id);
        record.insert(field.to_string(), value);
        self.save(&tables)?;
        debug!("Updated {}.{} on record {}", table, field, record_id);
        Ok(())
    }
}
