// src/infrastructure/documents/mod.rs
pub mod json_document_store;
pub mod memory_document_store;

pub use json_document_store::JsonDocumentStore;
pub use memory_document_store::InMemoryDocumentStore;
