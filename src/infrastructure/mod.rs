// src/infrastructure/mod.rs
pub mod di;
pub mod documents;
pub mod error;
pub mod storage;
