use tracing::{debug, warn};

use crate::domain::{ActiveFilterSection, FilterCategory};
use crate::errors::Result;
use crate::storage::SelectionStore;

/// Cross-category summary of every active selection.
///
/// Sections follow the fixed category order and categories without an
/// active entry are omitted. The summary is recomputed from the store on
/// every [`FilterAggregator::load_active`], since other screens may have
/// changed the maps in between.
pub struct FilterAggregator {
    store: SelectionStore,
    sections: Vec<ActiveFilterSection>,
}

impl FilterAggregator {
    pub fn new(store: SelectionStore) -> Self {
        Self {
            store,
            sections: Vec::new(),
        }
    }

    pub fn load_active(&mut self) -> &[ActiveFilterSection] {
        let mut sections = Vec::new();
        for category in FilterCategory::ALL {
            match self.store.load(category) {
                Ok(Some(map)) => {
                    if let Some(section) = ActiveFilterSection::from_map(category, &map) {
                        sections.push(section);
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(category = category.slug(), %err, "skipping unreadable selections");
                }
            }
        }
        debug!(sections = sections.len(), "active filters loaded");
        self.sections = sections;
        &self.sections
    }

    /// Unchecks one item in its category's map, then refreshes the summary.
    ///
    /// Nothing is written when the category has no saved map.
    pub fn remove_item(&mut self, category: FilterCategory, name: &str) -> Result<()> {
        if let Some(mut map) = self.store.load(category)? {
            if map.remove(name).is_some() {
                map.retain(|_, checked| *checked);
                self.store.save(category, &map)?;
                debug!(category = category.slug(), name, "active filter removed");
            }
        }
        self.load_active();
        Ok(())
    }

    /// Deletes every category's map. On failure the summary is reloaded so
    /// it shows whatever is still stored.
    pub fn clear_all(&mut self) -> Result<()> {
        if let Err(err) = self.store.remove_all() {
            warn!(%err, "could not clear filters");
            self.load_active();
            return Err(err);
        }
        self.sections.clear();
        Ok(())
    }

    pub fn sections(&self) -> &[ActiveFilterSection] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn total_active(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SelectionMap;
    use crate::errors::FilterError;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    /// Memory store whose delete of one key always fails.
    struct StuckKeyStore {
        inner: MemoryStore,
        stuck: &'static str,
    }

    impl KeyValueStore for StuckKeyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            if key == self.stuck {
                return Err(FilterError::Storage(format!("cannot delete {}", key)));
            }
            self.inner.remove(key)
        }
    }

    fn aggregator_with(checked: &[(FilterCategory, &str)]) -> (FilterAggregator, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        let store = SelectionStore::new(backend.clone());
        for category in FilterCategory::ALL {
            let map: SelectionMap = checked
                .iter()
                .filter(|(owner, _)| *owner == category)
                .map(|(_, name)| (name.to_string(), true))
                .collect();
            if !map.is_empty() {
                store.save(category, &map).unwrap();
            }
        }
        (FilterAggregator::new(store), backend)
    }

    #[test]
    fn single_allergen_produces_one_section() {
        let (mut aggregator, _) = aggregator_with(&[(FilterCategory::Allergens, "Peanuts")]);
        let sections = aggregator.load_active();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Selected Allergens");
        assert_eq!(sections[0].names(), vec!["Peanuts"]);

        aggregator
            .remove_item(FilterCategory::Allergens, "Peanuts")
            .unwrap();
        assert!(aggregator.is_empty());
        assert!(aggregator.load_active().is_empty());
    }

    #[test]
    fn sections_follow_fixed_category_order() {
        let (mut aggregator, backend) = aggregator_with(&[
            (FilterCategory::MealTimes, "Dinner"),
            (FilterCategory::Dishes, "Pad Thai"),
            (FilterCategory::Locations, "Wilbur Dining"),
        ]);
        backend.set("@ingredients_filter_state", "{}").unwrap();
        let titles: Vec<_> = aggregator.load_active().iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec!["Selected Dishes", "Selected Locations", "Selected Meal Times"]
        );
        assert_eq!(aggregator.total_active(), 3);
    }

    #[test]
    fn false_entries_are_not_active() {
        let (mut aggregator, backend) = aggregator_with(&[]);
        backend
            .set("@ingredients_filter_state", r#"{"Basil":false,"Garlic":true}"#)
            .unwrap();
        let sections = aggregator.load_active();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].names(), vec!["Garlic"]);
    }

    #[test]
    fn unreadable_category_is_skipped() {
        let (mut aggregator, backend) = aggregator_with(&[(FilterCategory::Allergens, "Soy")]);
        backend.set("@dishes_filter_state", "[").unwrap();
        let sections = aggregator.load_active();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category, FilterCategory::Allergens);
    }

    #[test]
    fn remove_item_leaves_other_categories() {
        let (mut aggregator, _) = aggregator_with(&[
            (FilterCategory::Allergens, "Peanuts"),
            (FilterCategory::Allergens, "Soy"),
            (FilterCategory::Dishes, "Pad Thai"),
        ]);
        aggregator.remove_item(FilterCategory::Allergens, "Soy").unwrap();
        let sections = aggregator.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].names(), vec!["Pad Thai"]);
        assert_eq!(sections[1].names(), vec!["Peanuts"]);
    }

    #[test]
    fn remove_item_without_saved_map_writes_nothing() {
        let (mut aggregator, backend) = aggregator_with(&[]);
        aggregator.remove_item(FilterCategory::Locations, "Stern Dining").unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn clear_all_deletes_every_map() {
        let (mut aggregator, backend) = aggregator_with(&[
            (FilterCategory::Allergens, "Peanuts"),
            (FilterCategory::MealTimes, "Lunch"),
        ]);
        aggregator.load_active();
        aggregator.clear_all().unwrap();
        assert!(aggregator.is_empty());
        assert!(backend.is_empty());
    }

    #[test]
    fn clear_all_failure_attempts_every_key_and_reloads_summary() {
        let backend = Arc::new(StuckKeyStore {
            inner: MemoryStore::new(),
            stuck: "@locations_filter_state",
        });
        let store = SelectionStore::new(backend.clone());
        let picks = [
            (FilterCategory::Dishes, "Pad Thai"),
            (FilterCategory::Ingredients, "Garlic"),
            (FilterCategory::Allergens, "Peanuts"),
            (FilterCategory::Locations, "Stern Dining"),
            (FilterCategory::MealTimes, "Lunch"),
        ];
        for (category, name) in picks {
            let map: SelectionMap = [(name.to_string(), true)].into_iter().collect();
            store.save(category, &map).unwrap();
        }

        let mut aggregator = FilterAggregator::new(store);
        assert_eq!(aggregator.load_active().len(), 5);
        assert!(aggregator.clear_all().is_err());

        assert!(backend.get("@meal_times_filter_state").unwrap().is_none());
        assert!(backend.get("@dishes_filter_state").unwrap().is_none());
        assert!(backend.get("@locations_filter_state").unwrap().is_some());
        let sections = aggregator.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category, FilterCategory::Locations);
    }
}
