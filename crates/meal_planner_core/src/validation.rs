//! crates/meal_planner_core/src/validation.rs
//!
//! Range checks a profile must pass before any goals are computed.
//! Field presence and enum membership are already enforced by deserialization.

use crate::domain::UserProfile;

pub const MIN_MEALS_PER_DAY: u8 = 3;
pub const MAX_MEALS_PER_DAY: u8 = 6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("age must be a positive number of years")]
    NonPositiveAge,
    #[error("{field} must be a positive number, got {value}")]
    NonPositiveMeasurement { field: &'static str, value: f64 },
    #[error("mealsPerDay must be between 3 and 6, got {0}")]
    MealsPerDayOutOfRange(u8),
    #[error("malformed profile: {0}")]
    Malformed(String),
}

/// Rejects profiles whose numbers the goal calculator cannot work with.
pub fn validate_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    if profile.age == 0 {
        return Err(ValidationError::NonPositiveAge);
    }
    check_measurement("height", profile.height)?;
    check_measurement("weight", profile.weight)?;

    if !(MIN_MEALS_PER_DAY..=MAX_MEALS_PER_DAY).contains(&profile.meals_per_day) {
        return Err(ValidationError::MealsPerDayOutOfRange(profile.meals_per_day));
    }
    Ok(())
}

fn check_measurement(field: &'static str, value: f64) -> Result<(), ValidationError> {
    // NaN fails the comparison as well.
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveMeasurement { field, value })
    }
}
