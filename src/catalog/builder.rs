use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    core::utils::ensure_dir,
    domain::{CatalogItem, FilterCategory},
    errors::Result,
};

use super::{Catalog, CatalogSet};

/// One served dish as produced by the dining-hall scraper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub meal_time: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

pub fn load_dishes(path: &Path) -> Result<Vec<DishRecord>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[derive(Default)]
struct Tally {
    counts: BTreeMap<String, u32>,
}

impl Tally {
    fn register(&mut self, name: &str) {
        self.counts.entry(name.to_string()).or_insert(0);
    }

    fn bump(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    fn into_catalog(self, category: FilterCategory) -> Catalog {
        let items = self
            .counts
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, count)| CatalogItem::new(name, count))
            .collect();
        Catalog::new(category, items)
    }
}

/// Derives every category catalog from a list of dishes.
///
/// Every value seen on any dish is listed, but only dishes with a name
/// contribute to counts. Items are sorted by name and empty labels dropped.
pub fn build_catalogs(dishes: &[DishRecord]) -> CatalogSet {
    let mut tallies: [Tally; 5] = Default::default();
    let slot = |category: FilterCategory| category.index();

    for dish in dishes {
        for allergen in &dish.allergens {
            tallies[slot(FilterCategory::Allergens)].register(allergen);
        }
        for ingredient in &dish.ingredients {
            tallies[slot(FilterCategory::Ingredients)].register(ingredient);
        }
        tallies[slot(FilterCategory::Locations)].register(&dish.location);
        tallies[slot(FilterCategory::MealTimes)].register(&dish.meal_time);
        if !dish.name.is_empty() {
            tallies[slot(FilterCategory::Dishes)].register(&dish.name);
        }
    }

    for dish in dishes.iter().filter(|dish| !dish.name.is_empty()) {
        for allergen in &dish.allergens {
            tallies[slot(FilterCategory::Allergens)].bump(allergen);
        }
        for ingredient in &dish.ingredients {
            tallies[slot(FilterCategory::Ingredients)].bump(ingredient);
        }
        tallies[slot(FilterCategory::Dishes)].bump(&dish.name);
        tallies[slot(FilterCategory::Locations)].bump(&dish.location);
        tallies[slot(FilterCategory::MealTimes)].bump(&dish.meal_time);
    }

    let mut set = CatalogSet::default();
    for (category, tally) in FilterCategory::ALL.into_iter().zip(tallies) {
        set.insert(tally.into_catalog(category));
    }
    set
}

/// Writes one fixture file per category into `dir`.
pub fn write_catalogs(set: &CatalogSet, dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let mut written = Vec::new();
    for catalog in set.iter() {
        let path = dir.join(catalog.category().fixture_file());
        fs::write(&path, catalog.to_json()?)?;
        written.push(path);
    }
    info!(dir = %dir.display(), files = written.len(), "catalog fixtures written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(name: &str, location: &str, meal: &str, allergens: &[&str], ingredients: &[&str]) -> DishRecord {
        DishRecord {
            name: name.into(),
            location: location.into(),
            meal_time: meal.into(),
            date: "2024-05-01".into(),
            allergens: allergens.iter().map(|s| s.to_string()).collect(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn counts(set: &CatalogSet, category: FilterCategory) -> Vec<(String, u32)> {
        set.get(category)
            .items()
            .iter()
            .map(|item| (item.name.clone(), item.count))
            .collect()
    }

    #[test]
    fn counts_named_dishes_and_sorts_by_name() {
        let dishes = vec![
            dish("Pad Thai", "Wilbur Dining", "Dinner", &["Peanuts", "Soy"], &["Tofu", "Garlic"]),
            dish("Omelette", "Branner Dining", "Breakfast", &["Eggs"], &["Eggs"]),
            dish("Pad Thai", "Branner Dining", "Dinner", &["Peanuts"], &["Tofu"]),
        ];
        let set = build_catalogs(&dishes);

        assert_eq!(
            counts(&set, FilterCategory::Dishes),
            vec![("Omelette".to_string(), 1), ("Pad Thai".to_string(), 2)]
        );
        assert_eq!(
            counts(&set, FilterCategory::Allergens),
            vec![
                ("Eggs".to_string(), 1),
                ("Peanuts".to_string(), 2),
                ("Soy".to_string(), 1)
            ]
        );
        assert_eq!(
            counts(&set, FilterCategory::Locations),
            vec![("Branner Dining".to_string(), 2), ("Wilbur Dining".to_string(), 1)]
        );
    }

    #[test]
    fn unnamed_dishes_register_values_without_counting() {
        let dishes = vec![dish("", "Lakeside Dining", "Lunch", &["Sesame"], &["Rice"])];
        let set = build_catalogs(&dishes);
        assert_eq!(counts(&set, FilterCategory::Dishes), Vec::new());
        assert_eq!(
            counts(&set, FilterCategory::Allergens),
            vec![("Sesame".to_string(), 0)]
        );
        assert_eq!(
            counts(&set, FilterCategory::MealTimes),
            vec![("Lunch".to_string(), 0)]
        );
    }

    #[test]
    fn empty_labels_are_dropped() {
        let dishes = vec![dish("Soup", "", "", &[""], &[])];
        let set = build_catalogs(&dishes);
        assert!(set.get(FilterCategory::Locations).is_empty());
        assert!(set.get(FilterCategory::Allergens).is_empty());
    }

    #[test]
    fn written_fixtures_load_back() {
        let temp = tempfile::TempDir::new().unwrap();
        let set = build_catalogs(&[dish("Soup", "Stern Dining", "Lunch", &[], &["Leek"])]);
        let written = write_catalogs(&set, temp.path()).unwrap();
        assert_eq!(written.len(), FilterCategory::ALL.len());

        let loaded = CatalogSet::load(temp.path()).unwrap();
        assert_eq!(
            loaded.get(FilterCategory::Ingredients).items(),
            &[CatalogItem::new("Leek", 1)]
        );
    }
}
