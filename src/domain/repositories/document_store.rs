// src/domain/repositories/document_store.rs
use crate::domain::error::DomainResult;
use serde_json::Value;

/// JSON field access on business records (services, portfolio items, vendors)
///
/// Writes are unconditional overwrites; no version or etag is checked.
pub trait DocumentStore: std::fmt::Debug + Send + Sync {
    /// Read a field. Missing records or fields read as `Value::Null`.
    fn get_field(&self, table: &str, record_id: &str, field: &str) -> DomainResult<Value>;

    /// Overwrite a field, creating the record if needed
    fn update_field(
        &self,
        table: &str,
        record_id: &str,
        field: &str,
        value: Value,
    ) -> DomainResult<()>;
}
