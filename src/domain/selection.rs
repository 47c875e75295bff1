use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::FilterCategory;

/// Persisted name -> checked flags for a single category.
pub type SelectionMap = BTreeMap<String, bool>;

/// Static catalog row. Fixture files produced by the data pipeline use the
/// key `filter` for the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(alias = "filter")]
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// A catalog item merged with its persisted checked flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEntry {
    pub name: String,
    pub count: u32,
    pub checked: bool,
}

impl SelectionEntry {
    pub fn from_catalog(item: &CatalogItem, checked: bool) -> Self {
        Self {
            name: item.name.clone(),
            count: item.count,
            checked,
        }
    }

    /// Row label as rendered by list screens, e.g. `Peanuts (5)`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.count)
    }
}

/// One checked item surfaced by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    pub category: FilterCategory,
    pub name: String,
}

/// Display projection grouping the active filters of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilterSection {
    pub category: FilterCategory,
    pub title: &'static str,
    pub items: Vec<ActiveFilter>,
}

impl ActiveFilterSection {
    /// Builds a section from a persisted map, returning `None` when nothing is checked.
    pub fn from_map(category: FilterCategory, map: &SelectionMap) -> Option<Self> {
        let items: Vec<ActiveFilter> = map
            .iter()
            .filter(|(_, checked)| **checked)
            .map(|(name, _)| ActiveFilter {
                category,
                name: name.clone(),
            })
            .collect();
        if items.is_empty() {
            None
        } else {
            Some(Self {
                category,
                title: category.section_title(),
                items,
            })
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}
