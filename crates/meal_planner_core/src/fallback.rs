//! crates/meal_planner_core/src/fallback.rs
//!
//! Deterministic, template-driven weekly plan built from the meal catalog.
//!
//! Each day picks its meals by day index, strips allergens from the ingredient lists,
//! and sizes every meal as a fixed share of the day's nutrition goals. The same profile,
//! catalog and timestamp always produce the same plan.

use crate::allergens::AllergenFilter;
use crate::catalog::{CatalogEntry, DietMenu, MealCatalog};
use crate::domain::{
    DayMealPlan, DietType, Meal, MealSlot, NutritionGoals, UserProfile, WeeklyMealPlan, WEEK_DAYS,
};
use crate::nutrition::round_non_negative;
use chrono::{DateTime, Utc};
use tracing::{error, warn};

/// Emitted when even a slot's placeholder ingredients all match the user's allergies.
/// Ingredient lists are never empty, so this is kept even if an allergy matches it too.
pub const NEUTRAL_SUBSTITUTE: &str = "allergen-free substitute";

#[derive(Debug, thiserror::Error)]
pub enum FallbackError {
    #[error("catalog has no menu for {0} and no omnivore default")]
    NoMenu(DietType),
    #[error("catalog menu has no {0} candidates")]
    EmptySlot(MealSlot),
}

//=========================================================================================
// Slot Templates
//=========================================================================================

/// Fraction of each daily goal assigned to one meal.
#[derive(Debug, Clone, Copy)]
struct MacroShares {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

struct SlotTemplate {
    shares: MacroShares,
    prep_time: u32,
    image: &'static str,
    descriptor: &'static str,
    generic_instructions: &'static [&'static str],
    placeholder_ingredients: &'static [&'static str],
}

// The shares do not add up to exactly 100% per macro; the day totals are whatever the
// meals sum to.
fn template(slot: MealSlot) -> &'static SlotTemplate {
    match slot {
        MealSlot::Breakfast => &BREAKFAST,
        MealSlot::Lunch => &LUNCH,
        MealSlot::Dinner => &DINNER,
        MealSlot::Snack => &SNACK,
    }
}

static BREAKFAST: SlotTemplate = SlotTemplate {
    shares: MacroShares { calories: 0.25, protein: 0.20, carbs: 0.30, fat: 0.20 },
    prep_time: 15,
    image: "https://images.unsplash.com/photo-1511690743698-d9d85f2fbf38?w=400&h=300&fit=crop",
    descriptor: "nutritious",
    generic_instructions: &[
        "Prepare all ingredients",
        "Follow cooking method for main components",
        "Combine and serve fresh",
    ],
    placeholder_ingredients: &["oats", "plant milk", "fruit", "nuts"],
};

static LUNCH: SlotTemplate = SlotTemplate {
    shares: MacroShares { calories: 0.35, protein: 0.40, carbs: 0.35, fat: 0.35 },
    prep_time: 25,
    image: "https://images.unsplash.com/photo-1540420773420-3366772f4999?w=400&h=300&fit=crop",
    descriptor: "balanced",
    generic_instructions: &[
        "Prep all ingredients",
        "Cook main components according to recipe",
        "Combine and season to taste",
    ],
    placeholder_ingredients: &["vegetables", "beans", "rice", "olive oil"],
};

static DINNER: SlotTemplate = SlotTemplate {
    shares: MacroShares { calories: 0.40, protein: 0.40, carbs: 0.35, fat: 0.45 },
    prep_time: 35,
    image: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=400&h=300&fit=crop",
    descriptor: "satisfying",
    generic_instructions: &[
        "Prepare all ingredients",
        "Cook main dish according to method",
        "Plate and serve hot",
    ],
    placeholder_ingredients: &["vegetables", "quinoa", "plant protein", "herbs"],
};

static SNACK: SlotTemplate = SlotTemplate {
    shares: MacroShares { calories: 0.10, protein: 0.10, carbs: 0.10, fat: 0.10 },
    prep_time: 5,
    image: "https://images.unsplash.com/photo-1488477181946-6428a0291777?w=400&h=300&fit=crop",
    descriptor: "light",
    generic_instructions: &["Portion the ingredients", "Serve fresh"],
    placeholder_ingredients: &["fruit", "seeds"],
};

//=========================================================================================
// Generation
//=========================================================================================

/// Builds the full week for `profile` from `catalog`.
pub fn generate_fallback_plan(
    catalog: &MealCatalog,
    profile: &UserProfile,
    goals: &NutritionGoals,
    generated_at: DateTime<Utc>,
) -> Result<WeeklyMealPlan, FallbackError> {
    let menu = catalog
        .menu_for(profile.diet_type)
        .ok_or(FallbackError::NoMenu(profile.diet_type))?;
    let allergens = AllergenFilter::new(&profile.allergies);

    let days = WEEK_DAYS
        .iter()
        .enumerate()
        .map(|(index, day)| build_day(menu, profile, goals, &allergens, day, index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WeeklyMealPlan::from_days(days, profile.clone(), generated_at))
}

fn build_day(
    menu: &DietMenu,
    profile: &UserProfile,
    goals: &NutritionGoals,
    allergens: &AllergenFilter,
    day: &str,
    day_index: usize,
) -> Result<DayMealPlan, FallbackError> {
    let mut meals = Vec::with_capacity(usize::from(profile.meals_per_day));

    for slot in [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner] {
        let entry = menu
            .pick(slot, day_index)
            .ok_or(FallbackError::EmptySlot(slot))?;
        meals.push(build_meal(slot, entry, profile, goals, allergens));
    }

    let snack_count = usize::from(profile.meals_per_day.saturating_sub(3));
    if snack_count > 0 && menu.entries(MealSlot::Snack).is_empty() {
        warn!(day, snack_count, "catalog has no snacks; day is served with three meals");
    } else {
        for snack_index in 0..snack_count {
            if let Some(entry) = menu.pick(MealSlot::Snack, day_index + snack_index) {
                meals.push(build_meal(MealSlot::Snack, entry, profile, goals, allergens));
            }
        }
    }

    Ok(DayMealPlan::from_meals(day, meals))
}

fn build_meal(
    slot: MealSlot,
    entry: &CatalogEntry,
    profile: &UserProfile,
    goals: &NutritionGoals,
    allergens: &AllergenFilter,
) -> Meal {
    let template = template(slot);
    let shares = template.shares;

    let instructions = match &entry.instructions {
        Some(steps) if !steps.is_empty() => steps.clone(),
        _ => to_owned_list(template.generic_instructions),
    };

    Meal {
        slot,
        name: entry.name.clone(),
        calories: scale(goals.daily_calories, shares.calories),
        protein: scale(goals.daily_protein, shares.protein),
        carbs: scale(goals.daily_carbs, shares.carbs),
        fat: scale(goals.daily_fat, shares.fat),
        prep_time: template.prep_time,
        image: template.image.to_string(),
        description: entry.description.clone(),
        ingredients: safe_ingredients(slot, entry, allergens),
        instructions,
        tags: vec![
            profile.diet_type.as_str().to_string(),
            slot.as_str().to_string(),
            template.descriptor.to_string(),
        ],
    }
}

/// The entry's ingredients minus allergens, never empty.
fn safe_ingredients(slot: MealSlot, entry: &CatalogEntry, allergens: &AllergenFilter) -> Vec<String> {
    let safe = allergens.retain_safe(&entry.ingredients);
    if !safe.is_empty() {
        return safe;
    }

    let placeholder = allergens.retain_safe(template(slot).placeholder_ingredients);
    if !placeholder.is_empty() {
        return placeholder;
    }

    if allergens.contains_allergen(NEUTRAL_SUBSTITUTE) {
        error!(
            meal = %entry.name,
            %slot,
            substitute = NEUTRAL_SUBSTITUTE,
            "allergy list matches every ingredient including the neutral substitute"
        );
    } else {
        warn!(meal = %entry.name, %slot, "allergy list excludes every placeholder ingredient");
    }
    vec![NEUTRAL_SUBSTITUTE.to_string()]
}

fn scale(daily_target: u32, share: f64) -> u32 {
    round_non_negative(f64::from(daily_target) * share)
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
