// Application state module
// Shared between every connection task

use std::time::Instant;

use super::types::Config;
use crate::catalog::CatalogStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogStore,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: &Config, catalog: CatalogStore) -> Self {
        Self {
            config: config.clone(),
            catalog,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    pub fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
