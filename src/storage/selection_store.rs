use std::sync::Arc;

use tracing::debug;

use crate::domain::{FilterCategory, SelectionMap};

use super::{KeyValueStore, Result};

/// Typed access to the per-category selection maps held in a [`KeyValueStore`].
#[derive(Clone)]
pub struct SelectionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SelectionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads a category's map; `Ok(None)` when nothing has been saved yet.
    pub fn load(&self, category: FilterCategory) -> Result<Option<SelectionMap>> {
        let Some(raw) = self.store.get(category.storage_key())? else {
            return Ok(None);
        };
        let map: SelectionMap = serde_json::from_str(&raw)?;
        debug!(category = category.slug(), entries = map.len(), "loaded selection map");
        Ok(Some(map))
    }

    pub fn save(&self, category: FilterCategory, map: &SelectionMap) -> Result<()> {
        let json = serde_json::to_string(map)?;
        self.store.set(category.storage_key(), &json)?;
        debug!(category = category.slug(), entries = map.len(), "saved selection map");
        Ok(())
    }

    /// Deletes every category's map.
    pub fn remove_all(&self) -> Result<()> {
        let keys: Vec<&str> = FilterCategory::ALL
            .iter()
            .map(|category| category.storage_key())
            .collect();
        self.store.remove_many(&keys)
    }
}
