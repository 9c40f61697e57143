// src/application/services/mod.rs
pub mod tagged_asset_service;
pub mod tagged_asset_service_impl;
