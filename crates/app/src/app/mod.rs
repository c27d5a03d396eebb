use std::sync::Arc;

use tracker_db::Store;

use crate::config::AppConfig;
use crate::error::Result;
use crate::services::{AppServices, SharedStore};
use crate::startup::ensure_store_dir;

/// Application state shared by the HTTP boundary and the binary.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: AppServices,
}

impl AppState {
    /// Builds the process-wide store handle from `config`. No I/O happens
    /// here; the store connects on first use.
    pub fn new(config: AppConfig) -> Result<Self> {
        let location = config.store.location()?;
        let store = Store::new(location, config.store.collection.clone())?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: AppConfig, store: SharedStore) -> Self {
        Self {
            config: Arc::new(config),
            services: AppServices::new(store),
        }
    }

    /// Prepares the store directory. An unreachable store is not fatal here;
    /// each request checks connectivity on its own.
    pub fn initialize(&self) -> Result<()> {
        let location = self.config.store.location()?;
        ensure_store_dir(&location)?;
        tracing::info!(
            location = %location,
            collection = %self.config.store.collection,
            "store configured"
        );
        Ok(())
    }
}
