use std::{path::Path, sync::Arc};

use tracing::info;

use crate::catalog::CatalogSet;
use crate::config::Config;
use crate::core::services::{FilterAggregator, PersistPolicy, PresenceService, SelectionListController};
use crate::core::utils::PathResolver;
use crate::domain::FilterCategory;
use crate::errors::Result;
use crate::storage::{JsonFileStore, KeyValueStore, SelectionStore};

/// Wires catalogs, the store, and the persistence policy together and hands
/// out the per-screen controllers.
pub struct FilterHub {
    store: Arc<dyn KeyValueStore>,
    catalogs: CatalogSet,
    policy: PersistPolicy,
}

impl FilterHub {
    pub fn new(store: Arc<dyn KeyValueStore>, catalogs: CatalogSet, policy: PersistPolicy) -> Self {
        Self {
            store,
            catalogs,
            policy,
        }
    }

    /// Builds a hub backed by the JSON file store under `base`.
    pub fn from_config(base: &Path, config: &Config) -> Result<Self> {
        let store_dir = config
            .store_dir
            .clone()
            .unwrap_or_else(|| PathResolver::state_dir_in(base));
        let store = JsonFileStore::new(Some(store_dir))?;
        let catalogs = match &config.catalog_dir {
            Some(dir) => CatalogSet::load(dir)?,
            None => CatalogSet::bundled(),
        };
        info!(
            store = %store.root().display(),
            policy = ?config.persist_policy,
            "filter hub ready"
        );
        Ok(Self::new(Arc::new(store), catalogs, config.persist_policy))
    }

    /// A loaded controller for `category`.
    pub fn open(&self, category: FilterCategory) -> SelectionListController {
        let mut controller = SelectionListController::new(
            self.catalogs.get(category).clone(),
            self.selection_store(),
            self.policy,
        );
        controller.load();
        controller
    }

    pub fn aggregator(&self) -> FilterAggregator {
        FilterAggregator::new(self.selection_store())
    }

    pub fn presence(&self) -> PresenceService {
        PresenceService::load(Arc::clone(&self.store))
    }

    pub fn selection_store(&self) -> SelectionStore {
        SelectionStore::new(Arc::clone(&self.store))
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    pub fn policy(&self) -> PersistPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn opened_controllers_share_the_store() {
        let hub = FilterHub::new(
            Arc::new(MemoryStore::new()),
            CatalogSet::bundled(),
            PersistPolicy::Deferred,
        );
        let mut allergens = hub.open(FilterCategory::Allergens);
        assert!(allergens.is_loaded());
        allergens.toggle("Peanuts").expect("bundled allergens include Peanuts");
        allergens.save().unwrap();

        let mut aggregator = hub.aggregator();
        let sections = aggregator.load_active();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].names(), vec!["Peanuts"]);

        let reopened = hub.open(FilterCategory::Allergens);
        assert_eq!(reopened.selected_count(), 1);
    }

    #[test]
    fn from_config_uses_state_dir_under_base() {
        let temp = tempfile::TempDir::new().unwrap();
        let hub = FilterHub::from_config(temp.path(), &Config::default()).unwrap();
        let mut meal_times = hub.open(FilterCategory::MealTimes);
        meal_times.toggle("Lunch").unwrap();
        meal_times.save().unwrap();
        assert!(temp
            .path()
            .join("state")
            .join("meal_times_filter_state.json")
            .exists());
    }
}
