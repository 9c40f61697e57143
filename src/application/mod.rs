// src/application/mod.rs
pub mod error;
pub mod services;

// Re-export key services for easier imports
pub use services::tagged_asset_service::{RecordRef, RemovalOutcome, TaggedAssetService};
pub use services::tagged_asset_service_impl::TaggedAssetServiceImpl;
