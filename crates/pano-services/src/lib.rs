pub mod accounts;
pub mod board;
pub mod config;
pub mod contacts;
pub mod logging;

use pano_store::Store;
use pano_types::Result;

use crate::config::Config;

/// Shared state for all services: the key-value store plus the runtime
/// configuration. The embedding UI process builds one of these and calls
/// the service methods implemented in the sibling modules.
pub struct App {
    store: Store,
    config: Config,
}

impl App {
    /// Open the store at the configured path and wire up the services.
    pub fn open(config: Config) -> Result<Self> {
        let store = Store::open(&config.db_path)?;
        Ok(Self { store, config })
    }

    /// Wrap an already-open store. Used by tests with an in-memory store.
    pub fn with_store(store: Store, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
