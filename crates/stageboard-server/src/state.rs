use stageboard_core::store::{FileStore, ItemStore};
use std::path::PathBuf;
use std::sync::Arc;

pub type SharedStore = Arc<dyn ItemStore + Send + Sync>;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub store: SharedStore,
}

impl AppState {
    /// State backed by the project's `.stageboard/items.yaml`.
    pub fn new(root: PathBuf) -> Self {
        let store = Arc::new(FileStore::new(root.clone()));
        Self { root, store }
    }

    pub fn with_store(root: PathBuf, store: SharedStore) -> Self {
        Self { root, store }
    }

    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }
}
