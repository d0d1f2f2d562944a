//! # Persistence
//!
//! Everything that leaves the process: fetching the menu, committing it and
//! reorder telemetry. The core only sees the [`NavigationStore`] trait.

pub mod store;
pub mod stores;

use std::sync::Arc;

use crate::core::config::ResolvedConfig;

pub use store::{NavigationStore, StoreError};
pub use stores::{FileStore, HttpStore};

/// Build the store named by the resolved config's backend.
pub fn build_store(config: &ResolvedConfig) -> Result<Arc<dyn NavigationStore>, StoreError> {
    match config.backend.as_str() {
        "http" => Ok(Arc::new(HttpStore::new(&config.base_url, config.timeout)?)),
        "file" => Ok(Arc::new(FileStore::new(config.file_path.clone()))),
        other => Err(StoreError::Config(format!(
            "unknown backend '{other}' (expected \"http\" or \"file\")"
        ))),
    }
}
