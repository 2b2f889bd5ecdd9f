//! crates/meal_planner_core/src/parse.rs
//!
//! Turns the raw text returned by the text-generation service into a weekly plan,
//! or explains why the text cannot be used.

use crate::allergens::AllergenFilter;
use crate::diet::diet_violation;
use crate::domain::{DayMealPlan, DietType, UserProfile, WeeklyMealPlan, WEEK_DAYS};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum PlanRejection {
    #[error("response was empty")]
    Empty,
    #[error("response is not a valid meal plan: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected 7 days, got {0}")]
    WrongDayCount(usize),
    #[error("day {index} should be {expected}, got '{found}'")]
    WrongDayLabel {
        index: usize,
        expected: &'static str,
        found: String,
    },
    #[error("{0} has no meals")]
    EmptyDay(String),
    #[error("'{meal}' on {day} has no ingredients")]
    EmptyIngredients { day: String, meal: String },
    #[error("'{meal}' on {day} contains the allergen ingredient '{ingredient}'")]
    AllergenFound {
        day: String,
        meal: String,
        ingredient: String,
    },
    #[error("'{meal}' on {day} is not {diet}: '{offender}'")]
    DietViolation {
        day: String,
        meal: String,
        diet: DietType,
        offender: String,
    },
}

/// The part of the generated JSON we trust. Profile, timestamp and aggregates are
/// supplied by the caller or recomputed, so whatever the model wrote there is ignored.
#[derive(Deserialize)]
struct GeneratedWeek {
    days: Vec<DayMealPlan>,
}

/// Parses `raw` and checks it against the submitted profile.
///
/// Accepted plans get canonical day labels, their day and week totals recomputed from
/// the meals, the submitted profile attached, and `generated_at` as their timestamp.
pub fn parse_generated_plan(
    raw: &str,
    profile: &UserProfile,
    generated_at: DateTime<Utc>,
) -> Result<WeeklyMealPlan, PlanRejection> {
    let json = strip_code_fence(raw);
    if json.is_empty() {
        return Err(PlanRejection::Empty);
    }

    let week: GeneratedWeek = serde_json::from_str(json)?;
    check_week(
        &week.days,
        &AllergenFilter::new(&profile.allergies),
        profile.diet_type,
    )?;

    let days = week
        .days
        .into_iter()
        .zip(WEEK_DAYS)
        .map(|(mut day, label)| {
            day.day = label.to_string();
            day.recompute_totals();
            day
        })
        .collect();
    Ok(WeeklyMealPlan::from_days(days, profile.clone(), generated_at))
}

fn check_week(
    days: &[DayMealPlan],
    allergens: &AllergenFilter,
    diet: DietType,
) -> Result<(), PlanRejection> {
    if days.len() != WEEK_DAYS.len() {
        return Err(PlanRejection::WrongDayCount(days.len()));
    }

    for (index, (day, expected)) in days.iter().zip(WEEK_DAYS).enumerate() {
        if !day.day.trim().eq_ignore_ascii_case(expected) {
            return Err(PlanRejection::WrongDayLabel {
                index,
                expected,
                found: day.day.clone(),
            });
        }
        if day.meals.is_empty() {
            return Err(PlanRejection::EmptyDay(day.day.clone()));
        }
        for meal in &day.meals {
            if meal.ingredients.is_empty() {
                return Err(PlanRejection::EmptyIngredients {
                    day: day.day.clone(),
                    meal: meal.name.clone(),
                });
            }
            if let Some(ingredient) = meal
                .ingredients
                .iter()
                .find(|i| allergens.contains_allergen(i))
            {
                return Err(PlanRejection::AllergenFound {
                    day: day.day.clone(),
                    meal: meal.name.clone(),
                    ingredient: ingredient.clone(),
                });
            }
            if let Some(offender) = diet_violation(diet, meal) {
                return Err(PlanRejection::DietViolation {
                    day: day.day.clone(),
                    meal: meal.name.clone(),
                    diet,
                    offender: offender.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Models sometimes wrap JSON in a markdown fence despite being told not to.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
