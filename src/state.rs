use std::sync::Arc;

use shindig_core::{ShindigResult, Store};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // No cached data: the stores re-read their files on each request so
    // edits made outside the server are picked up immediately
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> ShindigResult<Store> {
        Store::open(&self.config.data_dir)
    }
}
