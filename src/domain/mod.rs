// src/domain/mod.rs
pub mod asset_store;
pub mod error;
pub mod limits;
pub mod persisted;
pub mod repositories;
pub mod suggested_tags;
pub mod tag;
pub mod tagged_assets;
pub mod upload;
