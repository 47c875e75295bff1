use serde::{Deserialize, Serialize};
use strsim::levenshtein;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::domain::{FilterCategory, SelectionEntry, SelectionMap};
use crate::errors::Result;
use crate::storage::SelectionStore;
use crate::utils::text::{matches_query, normalize};

/// When toggles and clears reach the persisted map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistPolicy {
    /// Changes stay in memory until [`SelectionListController::save`].
    #[default]
    Deferred,
    /// Every toggle and clear is written through immediately.
    Immediate,
}

/// Checkable list for one filter category.
///
/// The entry list is a disposable view derived from the catalog and the
/// category's persisted map; the map is the only durable state.
pub struct SelectionListController {
    category: FilterCategory,
    catalog: Catalog,
    store: SelectionStore,
    policy: PersistPolicy,
    entries: Vec<SelectionEntry>,
    query: String,
    loaded: bool,
}

impl SelectionListController {
    pub fn new(catalog: Catalog, store: SelectionStore, policy: PersistPolicy) -> Self {
        let entries = unchecked_entries(&catalog);
        Self {
            category: catalog.category(),
            catalog,
            store,
            policy,
            entries,
            query: String::new(),
            loaded: false,
        }
    }

    /// Merges the persisted map over the catalog, in catalog order.
    ///
    /// A missing or unreadable map yields an all-unchecked list; the failure
    /// is logged, never returned.
    pub fn load(&mut self) -> &[SelectionEntry] {
        let persisted = match self.store.load(self.category) {
            Ok(map) => map.unwrap_or_default(),
            Err(err) => {
                warn!(
                    category = self.category.slug(),
                    %err,
                    "could not read saved selections; starting unchecked"
                );
                SelectionMap::new()
            }
        };
        self.entries = self
            .catalog
            .items()
            .iter()
            .map(|item| {
                let checked = persisted.get(&item.name).copied().unwrap_or(false);
                SelectionEntry::from_catalog(item, checked)
            })
            .collect();
        self.loaded = true;
        debug!(
            category = self.category.slug(),
            items = self.entries.len(),
            selected = self.selected_count(),
            "selection list loaded"
        );
        &self.entries
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// Entries whose normalized name contains the normalized query.
    pub fn filtered_items(&self) -> Vec<&SelectionEntry> {
        if normalize(&self.query).is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|entry| matches_query(&entry.name, &self.query))
            .collect()
    }

    pub fn selected(&self) -> Vec<&SelectionEntry> {
        self.entries.iter().filter(|entry| entry.checked).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.checked).count()
    }

    pub fn has_selection(&self) -> bool {
        self.entries.iter().any(|entry| entry.checked)
    }

    /// Flips the entry named `name`. Returns the new checked state, or `None`
    /// when no entry has that name.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|entry| entry.name == name)?;
        entry.checked = !entry.checked;
        let checked = entry.checked;
        self.write_through();
        Some(checked)
    }

    pub fn clear_all(&mut self) {
        for entry in &mut self.entries {
            entry.checked = false;
        }
        self.write_through();
    }

    /// Writes the checked entries back as the category's map.
    ///
    /// Only catalog entries are written, so names that left the catalog are
    /// dropped. Failures are logged and returned; in-memory state is kept.
    pub fn save(&self) -> Result<()> {
        let map: SelectionMap = self
            .entries
            .iter()
            .filter(|entry| entry.checked)
            .map(|entry| (entry.name.clone(), true))
            .collect();
        self.store.save(self.category, &map).map_err(|err| {
            warn!(category = self.category.slug(), %err, "could not save selections");
            err
        })
    }

    /// Closest catalog name to a mistyped `name`, if any is reasonably near.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let wanted = normalize(name);
        self.entries
            .iter()
            .map(|entry| (levenshtein(&normalize(&entry.name), &wanted), entry.name.as_str()))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub fn category(&self) -> FilterCategory {
        self.category
    }

    pub fn policy(&self) -> PersistPolicy {
        self.policy
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn write_through(&self) {
        if self.policy == PersistPolicy::Immediate {
            // Failure already logged by save().
            let _ = self.save();
        }
    }
}

fn unchecked_entries(catalog: &Catalog) -> Vec<SelectionEntry> {
    catalog
        .items()
        .iter()
        .map(|item| SelectionEntry::from_catalog(item, false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogItem;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn allergen_catalog() -> Catalog {
        Catalog::new(
            FilterCategory::Allergens,
            vec![CatalogItem::new("Peanuts", 5), CatalogItem::new("Gluten", 10)],
        )
    }

    fn allergen_controller(policy: PersistPolicy) -> (SelectionListController, Arc<MemoryStore>) {
        let backend = Arc::new(MemoryStore::new());
        let store = SelectionStore::new(backend.clone());
        (
            SelectionListController::new(allergen_catalog(), store, policy),
            backend,
        )
    }

    fn checked_flags(controller: &SelectionListController) -> Vec<(&str, bool)> {
        controller
            .items()
            .iter()
            .map(|entry| (entry.name.as_str(), entry.checked))
            .collect()
    }

    #[test]
    fn starts_unloaded_and_unchecked() {
        let (controller, _) = allergen_controller(PersistPolicy::Deferred);
        assert!(!controller.is_loaded());
        assert!(!controller.has_selection());
    }

    #[test]
    fn peanuts_scenario_round_trips() {
        let (mut controller, backend) = allergen_controller(PersistPolicy::Deferred);
        controller.load();
        assert_eq!(checked_flags(&controller), vec![("Peanuts", false), ("Gluten", false)]);

        assert_eq!(controller.toggle("Peanuts"), Some(true));
        controller.save().unwrap();
        assert_eq!(
            backend.get("@allergens_filter_state").unwrap().as_deref(),
            Some(r#"{"Peanuts":true}"#)
        );

        controller.load();
        assert_eq!(checked_flags(&controller), vec![("Peanuts", true), ("Gluten", false)]);
    }

    #[test]
    fn deferred_policy_waits_for_save() {
        let (mut controller, backend) = allergen_controller(PersistPolicy::Deferred);
        controller.load();
        controller.toggle("Gluten");
        controller.clear_all();
        controller.toggle("Peanuts");
        assert!(backend.get("@allergens_filter_state").unwrap().is_none());
    }

    #[test]
    fn immediate_policy_writes_on_toggle_and_clear() {
        let (mut controller, backend) = allergen_controller(PersistPolicy::Immediate);
        controller.load();
        controller.toggle("Gluten");
        assert_eq!(
            backend.get("@allergens_filter_state").unwrap().as_deref(),
            Some(r#"{"Gluten":true}"#)
        );
        controller.clear_all();
        assert_eq!(
            backend.get("@allergens_filter_state").unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn toggle_unknown_name_is_a_no_op() {
        let (mut controller, backend) = allergen_controller(PersistPolicy::Immediate);
        controller.load();
        assert_eq!(controller.toggle("Shellfish"), None);
        assert!(!controller.has_selection());
        assert!(backend.is_empty());
    }

    #[test]
    fn corrupt_map_loads_unchecked() {
        let (mut controller, backend) = allergen_controller(PersistPolicy::Deferred);
        backend.set("@allergens_filter_state", "{\"Peanuts\":").unwrap();
        controller.load();
        assert!(controller.is_loaded());
        assert_eq!(checked_flags(&controller), vec![("Peanuts", false), ("Gluten", false)]);
    }

    #[test]
    fn save_drops_names_outside_the_catalog() {
        let (mut controller, backend) = allergen_controller(PersistPolicy::Deferred);
        backend
            .set("@allergens_filter_state", r#"{"Peanuts":true,"Lupin":true}"#)
            .unwrap();
        controller.load();
        controller.save().unwrap();
        assert_eq!(
            backend.get("@allergens_filter_state").unwrap().as_deref(),
            Some(r#"{"Peanuts":true}"#)
        );
    }

    #[test]
    fn query_narrows_view_without_touching_state() {
        let (mut controller, backend) = allergen_controller(PersistPolicy::Immediate);
        controller.load();
        controller.set_query("glu");
        let names: Vec<_> = controller.filtered_items().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Gluten"]);
        assert_eq!(controller.items().len(), 2);
        assert!(backend.is_empty());

        controller.set_query("Peanut\u{2019}s");
        let names: Vec<_> = controller.filtered_items().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Peanuts"]);

        controller.set_query("");
        assert_eq!(controller.filtered_items().len(), 2);
    }

    #[test]
    fn suggests_nearest_catalog_name() {
        let (mut controller, _) = allergen_controller(PersistPolicy::Deferred);
        controller.load();
        assert_eq!(controller.suggest("peanut"), Some("Peanuts"));
        assert_eq!(controller.suggest("glutn"), Some("Gluten"));
        assert_eq!(controller.suggest("strawberries"), None);
    }
}
