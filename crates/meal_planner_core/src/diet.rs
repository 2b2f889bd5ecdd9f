//! crates/meal_planner_core/src/diet.rs
//!
//! Ingredient rules for the vegetarian and vegan diets.
//!
//! A term matches the start of any word in an ingredient, case-insensitively, so
//! "chicken" catches "Chickens" and "egg" catches "eggs" but not "veggie". A term directly
//! after a plant qualifier ("oat milk", "almond butter", "plant-based chicken") is exempt.

use crate::domain::{DietType, Meal};

const MEAT_AND_FISH: &[&str] = &[
    "beef", "chicken", "turkey", "pork", "lamb", "bacon", "ham", "sausage", "salmon", "tuna",
    "fish", "shrimp", "crab", "lobster", "seafood", "meat",
];

const ANIMAL_PRODUCTS: &[&str] = &["milk", "cheese", "yogurt", "butter", "cream", "egg", "honey"];

/// Words that start with a forbidden term but are plant foods.
const LOOKALIKES: &[&str] = &["butternut", "eggplant", "eggplants", "honeydew", "meatless"];

/// Tags that mark a meal as containing meat or fish regardless of its ingredients.
const MEAT_TAGS: &[&str] = &["meat", "fish", "non-vegetarian"];

const PLANT_QUALIFIERS: &[&str] = &[
    "almond", "oat", "soy", "coconut", "peanut", "cashew", "hazelnut", "nut", "rice", "hemp",
    "flax", "plant", "based", "free", "vegan", "tofu", "seitan", "cocoa", "sunflower", "seed",
    "veggie", "meatless",
];

const PLANT_PHRASES: &[&str] = &["non-dairy", "cream of tartar"];

/// Returns the first ingredient (or tag) of `meal` that `diet` does not allow.
pub fn diet_violation(diet: DietType, meal: &Meal) -> Option<&str> {
    if diet == DietType::Omnivore {
        return None;
    }

    if let Some(tag) = meal
        .tags
        .iter()
        .find(|tag| MEAT_TAGS.contains(&tag.trim().to_lowercase().as_str()))
    {
        return Some(tag.as_str());
    }

    forbidden_ingredient(diet, &meal.ingredients)
}

/// Returns the first of `ingredients` that `diet` does not allow.
pub fn forbidden_ingredient(diet: DietType, ingredients: &[String]) -> Option<&str> {
    let forbidden: &[&[&str]] = match diet {
        DietType::Omnivore => return None,
        DietType::Vegetarian => &[MEAT_AND_FISH],
        DietType::Vegan => &[MEAT_AND_FISH, ANIMAL_PRODUCTS],
    };

    ingredients
        .iter()
        .find(|ingredient| is_forbidden(ingredient, forbidden))
        .map(String::as_str)
}

fn is_forbidden(ingredient: &str, forbidden: &[&[&str]]) -> bool {
    let lowered = ingredient.to_lowercase();
    if PLANT_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        return false;
    }

    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    words.iter().enumerate().any(|(index, word)| {
        let qualified = index > 0 && PLANT_QUALIFIERS.contains(&words[index - 1]);
        !qualified
            && !LOOKALIKES.contains(word)
            && forbidden
                .iter()
                .flat_map(|list| list.iter())
                .any(|term| word.starts_with(term))
    })
}
