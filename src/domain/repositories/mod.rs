// src/domain/repositories/mod.rs
pub mod document_store;
pub mod object_store;
