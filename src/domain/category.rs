use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::FilterError;

/// One filter dimension. Variant order is the display order of the
/// active-filter summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterCategory {
    Dishes,
    Ingredients,
    Allergens,
    Locations,
    MealTimes,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 5] = [
        FilterCategory::Dishes,
        FilterCategory::Ingredients,
        FilterCategory::Allergens,
        FilterCategory::Locations,
        FilterCategory::MealTimes,
    ];

    /// Position in [`FilterCategory::ALL`].
    pub fn index(self) -> usize {
        match self {
            FilterCategory::Dishes => 0,
            FilterCategory::Ingredients => 1,
            FilterCategory::Allergens => 2,
            FilterCategory::Locations => 3,
            FilterCategory::MealTimes => 4,
        }
    }

    /// Key under which the category's selection map is persisted.
    pub fn storage_key(self) -> &'static str {
        match self {
            FilterCategory::Dishes => "@dishes_filter_state",
            FilterCategory::Ingredients => "@ingredients_filter_state",
            FilterCategory::Allergens => "@allergens_filter_state",
            FilterCategory::Locations => "@locations_filter_state",
            FilterCategory::MealTimes => "@meal_times_filter_state",
        }
    }

    pub fn section_title(self) -> &'static str {
        match self {
            FilterCategory::Dishes => "Selected Dishes",
            FilterCategory::Ingredients => "Selected Ingredients",
            FilterCategory::Allergens => "Selected Allergens",
            FilterCategory::Locations => "Selected Locations",
            FilterCategory::MealTimes => "Selected Meal Times",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterCategory::Dishes => "Dishes",
            FilterCategory::Ingredients => "Ingredients",
            FilterCategory::Allergens => "Allergens",
            FilterCategory::Locations => "Locations",
            FilterCategory::MealTimes => "Meal Times",
        }
    }

    /// Short identifier used by the shell and in type tags.
    pub fn slug(self) -> &'static str {
        match self {
            FilterCategory::Dishes => "dishes",
            FilterCategory::Ingredients => "ingredients",
            FilterCategory::Allergens => "allergens",
            FilterCategory::Locations => "locations",
            FilterCategory::MealTimes => "mealTimes",
        }
    }

    pub fn fixture_file(self) -> &'static str {
        match self {
            FilterCategory::Dishes => "dishes_filter.json",
            FilterCategory::Ingredients => "ingredients_filter.json",
            FilterCategory::Allergens => "allergens_filter.json",
            FilterCategory::Locations => "locations_filter.json",
            FilterCategory::MealTimes => "meal_times_filter.json",
        }
    }

    pub fn search_placeholder(self) -> &'static str {
        match self {
            FilterCategory::Dishes => "Looking for a specific dish?",
            FilterCategory::Ingredients => "Looking for a specific ingredient?",
            FilterCategory::Allergens => "Looking for a specific allergen?",
            FilterCategory::Locations => "Looking for a specific location?",
            FilterCategory::MealTimes => "Looking for a specific meal time?",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterCategory {
    type Err = FilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();
        match key.as_str() {
            "dishes" | "dish" => Ok(FilterCategory::Dishes),
            "ingredients" | "ingredient" => Ok(FilterCategory::Ingredients),
            "allergens" | "allergen" => Ok(FilterCategory::Allergens),
            "locations" | "location" => Ok(FilterCategory::Locations),
            "mealtimes" | "mealtime" => Ok(FilterCategory::MealTimes),
            _ => Err(FilterError::UnknownCategory(raw.to_string())),
        }
    }
}
