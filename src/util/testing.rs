// src/util/testing.rs

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::object_store::ObjectStore;
use crate::infrastructure::storage::InMemoryObjectStore;

/// Environment variables read by `config::load_settings`
pub const SETTINGS_ENV_VARS: &[&str] = &[
    "TAGFOLIO_STORAGE_ROOT",
    "TAGFOLIO_PUBLIC_BASE_URL",
    "TAGFOLIO_BUCKET",
    "TAGFOLIO_DOCUMENTS",
    "TAGFOLIO_MAX_PER_TAG",
    "TAGFOLIO_MAX_TOTAL",
];

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    pub public_base_url: &'static str,
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes the global test environment exactly once and sets up logging.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
        TestEnv {
            public_base_url: "https://cdn.test",
        }
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the `TAGFOLIO_*` environment on drop
#[derive(Debug, Clone)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            saved: SETTINGS_ENV_VARS
                .iter()
                .map(|name| (*name, env::var(name).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(val) => env::set_var(name, val),
                None => env::remove_var(name),
            }
        }
    }
}

/// In-memory object store that fails on demand
#[derive(Debug)]
pub struct FailingObjectStore {
    inner: InMemoryObjectStore,
    fail_upload_on: Option<usize>,
    fail_deletes: bool,
    attempts: AtomicUsize,
}

impl FailingObjectStore {
    fn with(fail_upload_on: Option<usize>, fail_deletes: bool) -> Self {
        Self {
            inner: InMemoryObjectStore::new(init_test_env().public_base_url)
                .expect("test base URL is valid"),
            fail_upload_on,
            fail_deletes,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Fails the `n`-th upload attempt (1-based); other uploads succeed
    pub fn failing_on(n: usize) -> Self {
        Self::with(Some(n), false)
    }

    /// Uploads succeed, every delete fails
    pub fn failing_deletes() -> Self {
        Self::with(None, true)
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryObjectStore {
        &self.inner
    }
}

impl ObjectStore for FailingObjectStore {
    fn upload(&self, bucket: &str, path: &str, data: &[u8]) -> DomainResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_upload_on == Some(attempt) {
            return Err(DomainError::Storage(format!(
                "simulated quota exceeded on attempt {}",
                attempt
            )));
        }
        self.inner.upload(bucket, path, data)
    }

    fn delete(&self, bucket: &str, path: &str) -> DomainResult<()> {
        if self.fail_deletes {
            return Err(DomainError::Storage("simulated permission denied".to_string()));
        }
        self.inner.delete(bucket, path)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.inner.public_url(bucket, path)
    }

    fn storage_path(&self, bucket: &str, url: &str) -> DomainResult<String> {
        self.inner.storage_path(bucket, url)
    }
}
