//! crates/meal_planner_core/src/nutrition.rs
//!
//! Daily calorie and macro targets from the Mifflin-St Jeor equation.
//!
//! Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//! *American Journal of Clinical Nutrition*, 51(2), 241-247.

use crate::domain::{ActivityLevel, Gender, NutritionGoals, UserProfile, WeightGoal};

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Grams of protein per kilogram of body weight.
const PROTEIN_G_PER_KG: f64 = 1.6;
/// Share of daily calories taken from fat.
const FAT_CALORIE_SHARE: f64 = 0.25;

const LOSE_DEFICIT_KCAL: f64 = 500.0;
const GAIN_SURPLUS_KCAL: f64 = 300.0;

/// Sex-specific constant of the Mifflin-St Jeor equation.
///
/// The equation only defines male and female coefficients; `Other` uses the female
/// coefficient, which gives the more conservative (lower) estimate.
pub fn bmr_offset(gender: Gender) -> f64 {
    match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
        Gender::Other => -161.0,
    }
}

pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Very => 1.725,
    }
}

/// Basal metabolic rate in kcal/day.
pub fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    10.0 * profile.weight + 6.25 * profile.height - 5.0 * f64::from(profile.age)
        + bmr_offset(profile.gender)
}

/// Computes the daily targets for a validated profile.
///
/// Intermediate values stay unrounded; each output is rounded to the nearest integer
/// and floored at zero, so a very small profile on a deficit yields `0` carbs rather
/// than a negative target.
pub fn compute_goals(profile: &UserProfile) -> NutritionGoals {
    let tdee = basal_metabolic_rate(profile) * activity_factor(profile.activity_level);

    let daily_calories = match profile.goal {
        WeightGoal::Lose => tdee - LOSE_DEFICIT_KCAL,
        WeightGoal::Maintain => tdee,
        WeightGoal::Gain => tdee + GAIN_SURPLUS_KCAL,
    };

    let daily_protein = profile.weight * PROTEIN_G_PER_KG;
    let daily_fat = daily_calories * FAT_CALORIE_SHARE / KCAL_PER_GRAM_FAT;
    let daily_carbs = (daily_calories
        - daily_protein * KCAL_PER_GRAM_PROTEIN
        - daily_fat * KCAL_PER_GRAM_FAT)
        / KCAL_PER_GRAM_CARBS;

    NutritionGoals {
        daily_calories: round_non_negative(daily_calories),
        daily_protein: round_non_negative(daily_protein),
        daily_carbs: round_non_negative(daily_carbs),
        daily_fat: round_non_negative(daily_fat),
        tdee: round_non_negative(tdee),
    }
}

pub(crate) fn round_non_negative(value: f64) -> u32 {
    // `as` saturates, and NaN maps to 0.
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CookingTime, DietType};
    use crate::test_support::sample_profile;

    #[test]
    fn reference_male_profile() {
        let goals = compute_goals(&sample_profile());
        assert_eq!(
            goals,
            NutritionGoals {
                daily_calories: 2759,
                daily_protein: 128,
                daily_carbs: 389,
                daily_fat: 77,
                tdee: 2759,
            }
        );
    }

    #[test]
    fn female_and_other_share_the_lower_offset() {
        let mut female = sample_profile();
        female.gender = Gender::Female;
        let mut other = sample_profile();
        other.gender = Gender::Other;

        assert_eq!(basal_metabolic_rate(&female), 1780.0 - 166.0);
        assert_eq!(compute_goals(&female), compute_goals(&other));
    }

    #[test]
    fn goal_adjusts_calories_but_not_tdee() {
        let mut lose = sample_profile();
        lose.goal = WeightGoal::Lose;
        let mut gain = sample_profile();
        gain.goal = WeightGoal::Gain;

        let lose = compute_goals(&lose);
        let gain = compute_goals(&gain);
        assert_eq!(lose.tdee, 2759);
        assert_eq!(gain.tdee, 2759);
        assert_eq!(lose.daily_calories, 2259);
        assert_eq!(gain.daily_calories, 3059);
    }

    #[test]
    fn every_activity_level_scales_bmr() {
        let levels = [
            (ActivityLevel::Sedentary, 2136),
            (ActivityLevel::Light, 2448),
            (ActivityLevel::Moderate, 2759),
            (ActivityLevel::Very, 3071),
        ];
        for (level, expected) in levels {
            let mut profile = sample_profile();
            profile.activity_level = level;
            assert_eq!(compute_goals(&profile).tdee, expected, "{level}");
        }
    }

    #[test]
    fn carbs_are_floored_at_zero_for_tiny_deficit_profiles() {
        let profile = UserProfile {
            age: 90,
            gender: Gender::Female,
            height: 120.0,
            weight: 60.0,
            activity_level: ActivityLevel::Sedentary,
            goal: WeightGoal::Lose,
            diet_type: DietType::Vegan,
            allergies: vec![],
            restrictions: vec![],
            meals_per_day: 3,
            cooking_time: CookingTime::Quick,
            budget: None,
        };
        // bmr = 600 + 750 - 450 - 161 = 739; tdee = 886.8; calories = 386.8
        // protein 96g alone is 384 kcal, so the carb remainder goes negative.
        let goals = compute_goals(&profile);
        assert_eq!(goals.daily_calories, 387);
        assert_eq!(goals.daily_protein, 96);
        assert_eq!(goals.daily_carbs, 0);
    }

    #[test]
    fn outputs_never_negative_even_when_calories_would_be() {
        let mut profile = sample_profile();
        profile.age = 120;
        profile.height = 50.0;
        profile.weight = 3.0;
        profile.gender = Gender::Female;
        profile.activity_level = ActivityLevel::Sedentary;
        profile.goal = WeightGoal::Lose;

        let goals = compute_goals(&profile);
        assert_eq!(goals.daily_calories, 0);
        assert_eq!(goals.daily_fat, 0);
        assert_eq!(goals.daily_carbs, 0);
    }
}
