// src/config.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::limits::AssetLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, instrument, trace, warn};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Directory holding one sub-directory per bucket
    #[serde(default = "default_storage_root")]
    pub storage_root: String,

    /// Base URL the storage root is served under
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Bucket that images are uploaded to (default: "portfolio")
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// JSON file holding the business records
    #[serde(default = "default_documents_path")]
    pub documents_path: String,

    /// Per-tag and total image caps
    #[serde(default)]
    pub limits: AssetLimits,
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/tagfolio")
}

const DEFAULT_CONFIG_DIR: &str = "~/.config/tagfolio";

fn default_storage_root() -> String {
    format!("{}/storage", DEFAULT_CONFIG_DIR)
}

fn default_public_base_url() -> String {
    "http://localhost:8080/storage".to_string()
}

fn default_bucket() -> String {
    "portfolio".to_string()
}

fn default_documents_path() -> String {
    format!("{}/documents.json", DEFAULT_CONFIG_DIR)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            public_base_url: default_public_base_url(),
            bucket: default_bucket(),
            documents_path: default_documents_path(),
            limits: AssetLimits::default(),
        }
    }
}

impl Settings {
    pub fn storage_root_path(&self) -> PathBuf {
        expand_path(&self.storage_root)
    }

    pub fn documents_file(&self) -> PathBuf {
        expand_path(&self.documents_path)
    }
}

/// Expands a leading `~` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn read_settings_file(path: &Path) -> DomainResult<Settings> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Other(format!("Cannot read config {}: {}", path.display(), e)))?;
    toml::from_str::<Settings>(&text)
        .map_err(|e| DomainError::Other(format!("Invalid config {}: {}", path.display(), e)))
}

fn env_number<T: FromStr>(name: &str) -> DomainResult<Option<T>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| DomainError::Other(format!("{} must be a number, got '{}'", name, value))),
        Err(_) => Ok(None),
    }
}

fn apply_env_overrides(settings: &mut Settings) -> DomainResult<()> {
    if let Ok(storage_root) = std::env::var("TAGFOLIO_STORAGE_ROOT") {
        trace!("Using TAGFOLIO_STORAGE_ROOT from environment: {}", storage_root);
        settings.storage_root = storage_root;
    }
    if let Ok(base_url) = std::env::var("TAGFOLIO_PUBLIC_BASE_URL") {
        trace!("Using TAGFOLIO_PUBLIC_BASE_URL from environment: {}", base_url);
        settings.public_base_url = base_url;
    }
    if let Ok(bucket) = std::env::var("TAGFOLIO_BUCKET") {
        trace!("Using TAGFOLIO_BUCKET from environment: {}", bucket);
        settings.bucket = bucket;
    }
    if let Ok(documents) = std::env::var("TAGFOLIO_DOCUMENTS") {
        trace!("Using TAGFOLIO_DOCUMENTS from environment: {}", documents);
        settings.documents_path = documents;
    }
    if let Some(max_per_tag) = env_number("TAGFOLIO_MAX_PER_TAG")? {
        settings.limits.max_per_tag = max_per_tag;
    }
    if let Some(max_total) = env_number("TAGFOLIO_MAX_TOTAL")? {
        settings.limits.max_total = max_total;
    }
    Ok(())
}

/// Load settings: defaults, then a config file, then `TAGFOLIO_*` environment variables.
///
/// An explicitly given config file must exist and parse. The default file
/// (`~/.config/tagfolio/config.toml`) is skipped with a warning when broken.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => {
            debug!("Loading config from: {:?}", path);
            read_settings_file(path)?
        }
        None => {
            let default_path = config_dir().join("config.toml");
            if default_path.exists() {
                match read_settings_file(&default_path) {
                    Ok(settings) => settings,
                    Err(e) => {
                        warn!("{}. Using defaults.", e);
                        Settings::default()
                    }
                }
            } else {
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings)?;

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
