//! Integration tests for Caseback.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p caseback-integration-tests
//!
//! # With storefront logs
//! RUST_LOG=caseback_storefront=debug cargo test -p caseback-integration-tests -- --nocapture
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart persistence and reconciliation
//! - `catalog_filter` - Product and category visibility
//! - `storefront_session` - Event sequences through the `Storefront` facade
//!
//! This library holds the shared fixtures those tests use.

use caseback_storefront::catalog::{Catalog, Category, ProductCard};
use caseback_storefront::storage::{KeyValueStore, MemoryStore, StorageError};
use tracing_subscriber::EnvFilter;

/// Install a test-writer tracing subscriber once per test binary.
///
/// Defaults to debug level for the storefront crate if `RUST_LOG` is not set.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "caseback_storefront=debug".into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn card(id: &str, name: &str, price_text: &str) -> ProductCard {
    ProductCard {
        id: id.to_string(),
        name: name.to_string(),
        price_text: price_text.to_string(),
        image_url: format!("images/{id}.webp"),
    }
}

/// The two-brand watch catalog used across scenarios.
///
/// - Rolex: Submariner ($9,000), Daytona ($14,000)
/// - Omega: Seamaster ($5,000)
///
/// # Panics
///
/// Panics if the fixture data is invalid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn watch_catalog() -> Catalog {
    let mut rolex = Category::new("Rolex");
    rolex.push_card(card("rolex-submariner", "Submariner", "$9,000")).unwrap();
    rolex.push_card(card("rolex-daytona", "Daytona", "$14,000")).unwrap();

    let mut omega = Category::new("Omega");
    omega.push_card(card("omega-seamaster", "Seamaster", "$5,000")).unwrap();

    Catalog::from_categories([rolex, omega]).unwrap()
}

/// Store that counts writes and can be switched to fail them.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    writes: usize,
    fail_writes: bool,
}

impl RecordingStore {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording store seeded with one entry.
    #[must_use]
    pub fn seeded(key: &str, value: &str) -> Self {
        Self {
            inner: MemoryStore::new().with_entry(key, value),
            ..Self::default()
        }
    }

    /// Make subsequent writes fail (or succeed again).
    pub const fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Raw value stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.inner.raw(key)
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.inner.set(key, value)?;
        self.writes += 1;
        Ok(())
    }
}
