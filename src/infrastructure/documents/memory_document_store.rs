// src/infrastructure/documents/memory_document_store.rs
use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::document_store::DocumentStore;

type FieldKey = (String, String, String);

/// Document store held in memory, keyed by `(table, record_id, field)`
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    fields: Mutex<HashMap<FieldKey, Value>>,
    writes: Mutex<usize>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write
    pub fn with_field(self, table: &str, record_id: &str, field: &str, value: Value) -> Self {
        if let Ok(mut fields) = self.fields.lock() {
            fields.insert(key(table, record_id, field), value);
        }
        self
    }

    /// Number of `update_field` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or_default()
    }
}

fn key(table: &str, record_id: &str, field: &str) -> FieldKey {
    (table.to_string(), record_id.to_string(), field.to_string())
}

impl DocumentStore for InMemoryDocumentStore {
    #[instrument(skip(self), level = "trace")]
    fn get_field(&self, table: &str, record_id: &str, field: &str) -> DomainResult<Value> {
        let fields = self
            .fields
            .lock()
            .map_err(|e| DomainError::Document(format!("document store lock poisoned: {}", e)))?;
        Ok(fields
            .get(&key(table, record_id, field))
            .cloned()
            .unwrap_or(Value::Null))
    }

    #[instrument(skip(self, value), level = "trace")]
    fn update_field(
        &self,
        table: &str,
        record_id: &str,
        field: &str,
        value: Value,
    ) -> DomainResult<()> {
        let mut fields = self
            .fields
            .lock()
            .map_err(|e| DomainError::Document(format!("document store lock poisoned: {}", e)))?;
        fields.insert(key(table, record_id, field), value);
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }
}
