//! Application state for the DayFlow HRMS API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, HrmsConfig};
use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration (including the capability table) and the record
/// store.
#[derive(Clone)]
pub struct AppState {
    /// The loaded HRMS configuration.
    config: Arc<ConfigLoader>,
    /// The record store.
    store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates a new application state with an empty store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Creates an application state over an existing store.
    pub fn with_store(config: ConfigLoader, store: Arc<MemoryStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HrmsConfig {
        self.config.config()
    }

    /// Returns the record store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}
