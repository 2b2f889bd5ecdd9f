//! crates/meal_planner_core/src/catalog.rs
//!
//! The fixed table of candidate meals used by the fallback generator.
//!
//! The table is data, not code: the built-in version is compiled in from
//! `catalog/meals.json`, and deployments can point the service at a replacement file.
//! Either way it is validated once when loaded and treated as immutable afterwards.

use crate::diet::forbidden_ingredient;
use crate::domain::{DietType, MealSlot};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../catalog/meals.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog has no omnivore menu to fall back on")]
    MissingDefaultMenu,
    #[error("the {diet} menu has no {slot} entries")]
    EmptySlot { diet: DietType, slot: MealSlot },
    #[error("the {diet} menu has an entry with {problem}")]
    BadEntry { diet: DietType, problem: String },
}

/// One candidate meal before it is fitted to a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub ingredients: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub instructions: Option<Vec<String>>,
}

/// Candidates for each slot of one diet type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DietMenu {
    pub breakfast: Vec<CatalogEntry>,
    pub lunch: Vec<CatalogEntry>,
    pub dinner: Vec<CatalogEntry>,
    #[serde(default)]
    pub snack: Vec<CatalogEntry>,
}

impl DietMenu {
    pub fn entries(&self, slot: MealSlot) -> &[CatalogEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snack => &self.snack,
        }
    }

    /// Picks the entry for `index` by wrapping around the slot's candidates.
    /// Returns `None` only when the slot has no candidates at all.
    pub fn pick(&self, slot: MealSlot, index: usize) -> Option<&CatalogEntry> {
        let entries = self.entries(slot);
        if entries.is_empty() {
            None
        } else {
            entries.get(index % entries.len())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealCatalog {
    pub version: String,
    menus: HashMap<DietType, DietMenu>,
}

impl MealCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: MealCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The menu for `diet`, or the omnivore menu when the catalog has none for it.
    pub fn menu_for(&self, diet: DietType) -> Option<&DietMenu> {
        self.menus
            .get(&diet)
            .or_else(|| self.menus.get(&DietType::Omnivore))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if !self.menus.contains_key(&DietType::Omnivore) {
            return Err(CatalogError::MissingDefaultMenu);
        }

        for (&diet, menu) in &self.menus {
            for slot in [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner] {
                if menu.entries(slot).is_empty() {
                    return Err(CatalogError::EmptySlot { diet, slot });
                }
            }

            let all_entries = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner, MealSlot::Snack]
                .into_iter()
                .flat_map(|slot| menu.entries(slot));
            for entry in all_entries {
                if entry.name.trim().is_empty() {
                    return Err(CatalogError::BadEntry {
                        diet,
                        problem: "an empty name".to_string(),
                    });
                }
                if entry.ingredients.is_empty() {
                    return Err(CatalogError::BadEntry {
                        diet,
                        problem: format!("no ingredients ('{}')", entry.name),
                    });
                }
                if let Some(ingredient) = forbidden_ingredient(diet, &entry.ingredients) {
                    return Err(CatalogError::BadEntry {
                        diet,
                        problem: format!("a disallowed ingredient ('{}': {})", entry.name, ingredient),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads_every_diet() {
        let catalog = MealCatalog::builtin().expect("builtin catalog must be valid");
        for diet in [DietType::Omnivore, DietType::Vegetarian, DietType::Vegan] {
            let menu = catalog.menu_for(diet).unwrap();
            assert!(!menu.breakfast.is_empty());
            assert!(!menu.lunch.is_empty());
            assert!(!menu.dinner.is_empty());
            assert!(!menu.snack.is_empty());
        }
    }

    #[test]
    fn pick_wraps_around_candidates() {
        let catalog = MealCatalog::builtin().unwrap();
        let menu = catalog.menu_for(DietType::Vegan).unwrap();
        let count = menu.lunch.len();
        assert_eq!(menu.pick(MealSlot::Lunch, 0), menu.pick(MealSlot::Lunch, count));
        assert_eq!(menu.pick(MealSlot::Lunch, 1).unwrap().name, menu.lunch[1].name);
    }

    #[test]
    fn missing_diet_falls_back_to_omnivore() {
        let json = r#"{
            "version": "test",
            "menus": {
                "omnivore": {
                    "breakfast": [{ "name": "Eggs", "ingredients": ["eggs"], "description": "" }],
                    "lunch": [{ "name": "Soup", "ingredients": ["broth"], "description": "" }],
                    "dinner": [{ "name": "Steak", "ingredients": ["beef"], "description": "" }]
                }
            }
        }"#;
        let catalog = MealCatalog::from_json(json).unwrap();
        let menu = catalog.menu_for(DietType::Vegan).unwrap();
        assert_eq!(menu.dinner[0].name, "Steak");
        assert!(menu.snack.is_empty());
        assert!(menu.pick(MealSlot::Snack, 3).is_none());
    }

    #[test]
    fn rejects_catalog_without_omnivore_menu() {
        let json = r#"{ "version": "x", "menus": {} }"#;
        assert!(matches!(
            MealCatalog::from_json(json),
            Err(CatalogError::MissingDefaultMenu)
        ));
    }

    #[test]
    fn rejects_menu_with_empty_slot() {
        let json = r#"{
            "version": "x",
            "menus": {
                "omnivore": {
                    "breakfast": [{ "name": "Eggs", "ingredients": ["eggs"], "description": "" }],
                    "lunch": [],
                    "dinner": [{ "name": "Steak", "ingredients": ["beef"], "description": "" }]
                }
            }
        }"#;
        assert!(matches!(
            MealCatalog::from_json(json),
            Err(CatalogError::EmptySlot { slot: MealSlot::Lunch, .. })
        ));
    }

    #[test]
    fn rejects_vegan_menu_with_dairy() {
        let json = r#"{
            "version": "x",
            "menus": {
                "omnivore": {
                    "breakfast": [{ "name": "Eggs", "ingredients": ["eggs"], "description": "" }],
                    "lunch": [{ "name": "Soup", "ingredients": ["broth"], "description": "" }],
                    "dinner": [{ "name": "Steak", "ingredients": ["beef"], "description": "" }]
                },
                "vegan": {
                    "breakfast": [{ "name": "Porridge", "ingredients": ["oats", "oat milk"], "description": "" }],
                    "lunch": [{ "name": "Toast", "ingredients": ["bread", "butter"], "description": "" }],
                    "dinner": [{ "name": "Curry", "ingredients": ["lentils"], "description": "" }]
                }
            }
        }"#;
        assert!(matches!(
            MealCatalog::from_json(json),
            Err(CatalogError::BadEntry { diet: DietType::Vegan, .. })
        ));
    }

    #[test]
    fn rejects_entry_without_ingredients() {
        let json = r#"{
            "version": "x",
            "menus": {
                "omnivore": {
                    "breakfast": [{ "name": "Air", "ingredients": [], "description": "" }],
                    "lunch": [{ "name": "Soup", "ingredients": ["broth"], "description": "" }],
                    "dinner": [{ "name": "Steak", "ingredients": ["beef"], "description": "" }]
                }
            }
        }"#;
        assert!(matches!(
            MealCatalog::from_json(json),
            Err(CatalogError::BadEntry { .. })
        ));
    }
}
