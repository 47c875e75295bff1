//! Static per-category catalogs of selectable items.
//!
//! Catalogs are read-only inputs: fixture JSON arrays of `{name, count}`
//! produced by the data pipeline (see [`builder`]), or the small defaults
//! compiled into the crate.

pub mod builder;

use std::{
    collections::HashSet,
    fs,
    io::ErrorKind,
    path::Path,
};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::{
    domain::{CatalogItem, FilterCategory},
    errors::Result,
};

pub use builder::{build_catalogs, load_dishes, write_catalogs, DishRecord};

static BUNDLED: Lazy<CatalogSet> = Lazy::new(|| {
    let mut set = CatalogSet::default();
    for category in FilterCategory::ALL {
        let raw = bundled_source(category);
        // Bundled fixtures are checked by tests; a bad one degrades to empty.
        let catalog = Catalog::from_json(category, raw).unwrap_or_else(|err| {
            warn!(category = category.slug(), %err, "bundled catalog is invalid");
            Catalog::empty(category)
        });
        set.insert(catalog);
    }
    set
});

fn bundled_source(category: FilterCategory) -> &'static str {
    match category {
        FilterCategory::Dishes => include_str!("../../assets/data/dishes_filter.json"),
        FilterCategory::Ingredients => include_str!("../../assets/data/ingredients_filter.json"),
        FilterCategory::Allergens => include_str!("../../assets/data/allergens_filter.json"),
        FilterCategory::Locations => include_str!("../../assets/data/locations_filter.json"),
        FilterCategory::MealTimes => include_str!("../../assets/data/meal_times_filter.json"),
    }
}

/// Ordered, name-unique list of items for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    category: FilterCategory,
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog, keeping the first occurrence of any duplicated name.
    pub fn new(category: FilterCategory, items: Vec<CatalogItem>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.name.clone()) {
                unique.push(item);
            } else {
                warn!(
                    category = category.slug(),
                    name = %item.name,
                    "duplicate catalog entry ignored"
                );
            }
        }
        Self {
            category,
            items: unique,
        }
    }

    pub fn empty(category: FilterCategory) -> Self {
        Self {
            category,
            items: Vec::new(),
        }
    }

    pub fn from_json(category: FilterCategory, raw: &str) -> Result<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(raw)?;
        Ok(Self::new(category, items))
    }

    /// Reads `<dir>/<category fixture file>`; `Ok(None)` when the file is absent.
    pub fn load_from_dir(category: FilterCategory, dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(category.fixture_file());
        match fs::read_to_string(&path) {
            Ok(raw) => {
                let catalog = Self::from_json(category, &raw)?;
                debug!(
                    category = category.slug(),
                    items = catalog.len(),
                    path = %path.display(),
                    "loaded catalog"
                );
                Ok(Some(catalog))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn category(&self) -> FilterCategory {
        self.category
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }
}

/// One catalog per category.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    catalogs: [Catalog; 5],
}

impl Default for CatalogSet {
    fn default() -> Self {
        Self {
            catalogs: FilterCategory::ALL.map(Catalog::empty),
        }
    }
}

impl CatalogSet {
    /// Catalogs compiled into the crate.
    pub fn bundled() -> Self {
        BUNDLED.clone()
    }

    /// Loads every category from `dir`, falling back to the bundled catalog
    /// for any fixture file that does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut set = Self::default();
        for category in FilterCategory::ALL {
            let catalog = match Catalog::load_from_dir(category, dir)? {
                Some(catalog) => catalog,
                None => {
                    debug!(category = category.slug(), "fixture missing; using bundled catalog");
                    BUNDLED.get(category).clone()
                }
            };
            set.insert(catalog);
        }
        Ok(set)
    }

    pub fn insert(&mut self, catalog: Catalog) {
        let index = catalog.category().index();
        self.catalogs[index] = catalog;
    }

    pub fn get(&self, category: FilterCategory) -> &Catalog {
        &self.catalogs[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Catalog> {
        self.catalogs.iter()
    }
}
