//! crates/meal_planner_core/src/domain.rs
//!
//! Defines the core data structures for the meal planner.
//! The serde attributes pin the JSON wire shape shared with clients and with the
//! text-generation service, so these types round-trip through serialization unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

//=========================================================================================
// Profile Enums
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// How active the user is on a typical week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Very,
}

/// The body-weight direction the plan should support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightGoal {
    Lose,
    Maintain,
    Gain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    Omnivore,
    Vegetarian,
    Vegan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookingTime {
    Quick,
    Moderate,
    Elaborate,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    Medium,
    High,
    Flexible,
}

/// A meal's role within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }
}

impl DietType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Omnivore => "omnivore",
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
        }
    }
}

// Display impls feed the prompt builder, which wants the same lowercase words the wire uses.
macro_rules! display_via_serde_name {
    ($($ty:ty => { $($variant:path => $name:literal),+ $(,)? }),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let name = match self {
                        $($variant => $name),+
                    };
                    f.write_str(name)
                }
            }
        )+
    };
}

display_via_serde_name! {
    Gender => { Gender::Male => "male", Gender::Female => "female", Gender::Other => "other" },
    ActivityLevel => {
        ActivityLevel::Sedentary => "sedentary",
        ActivityLevel::Light => "light",
        ActivityLevel::Moderate => "moderate",
        ActivityLevel::Very => "very",
    },
    WeightGoal => { WeightGoal::Lose => "lose", WeightGoal::Maintain => "maintain", WeightGoal::Gain => "gain" },
    CookingTime => {
        CookingTime::Quick => "quick",
        CookingTime::Moderate => "moderate",
        CookingTime::Elaborate => "elaborate",
        CookingTime::Mixed => "mixed",
    },
    Budget => { Budget::Low => "low", Budget::Medium => "medium", Budget::High => "high", Budget::Flexible => "flexible" },
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================================
// Profile and Goals
//=========================================================================================

/// Everything the user told us about themselves in the planner form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    /// Centimetres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub activity_level: ActivityLevel,
    pub goal: WeightGoal,
    pub diet_type: DietType,
    #[serde(default)]
    pub allergies: Vec<String>,
    // Carried through to the prompt only; the fallback generator does not act on these.
    #[serde(default)]
    pub restrictions: Vec<String>,
    pub meals_per_day: u8,
    pub cooking_time: CookingTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
}

/// Daily calorie and macro targets derived from a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionGoals {
    pub daily_calories: u32,
    pub daily_protein: u32,
    pub daily_carbs: u32,
    pub daily_fat: u32,
    pub tdee: u32,
}

//=========================================================================================
// Meal Plan
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "type")]
    pub slot: MealSlot,
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    /// Minutes.
    pub prep_time: u32,
    pub image: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMealPlan {
    pub day: String,
    pub meals: Vec<Meal>,
    // Defaulted so generated plans that omit totals still parse; totals are recomputed anyway.
    #[serde(default)]
    pub total_calories: u32,
    #[serde(default)]
    pub total_protein: u32,
    #[serde(default)]
    pub total_carbs: u32,
    #[serde(default)]
    pub total_fat: u32,
}

impl DayMealPlan {
    /// Builds a day whose totals are the sums over `meals`.
    pub fn from_meals(day: impl Into<String>, meals: Vec<Meal>) -> Self {
        let mut plan = Self {
            day: day.into(),
            meals,
            total_calories: 0,
            total_protein: 0,
            total_carbs: 0,
            total_fat: 0,
        };
        plan.recompute_totals();
        plan
    }

    pub fn recompute_totals(&mut self) {
        self.total_calories = saturating_sum(self.meals.iter().map(|m| m.calories));
        self.total_protein = saturating_sum(self.meals.iter().map(|m| m.protein));
        self.total_carbs = saturating_sum(self.meals.iter().map(|m| m.carbs));
        self.total_fat = saturating_sum(self.meals.iter().map(|m| m.fat));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMealPlan {
    pub days: Vec<DayMealPlan>,
    pub user_profile: UserProfile,
    pub generated_at: DateTime<Utc>,
    pub total_weekly_calories: u32,
    pub average_daily_calories: u32,
}

impl WeeklyMealPlan {
    /// Assembles a week, deriving the weekly total and daily average from `days`.
    pub fn from_days(
        days: Vec<DayMealPlan>,
        user_profile: UserProfile,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let total_weekly_calories = saturating_sum(days.iter().map(|d| d.total_calories));
        Self {
            days,
            user_profile,
            generated_at,
            total_weekly_calories,
            average_daily_calories: average_of_week(total_weekly_calories),
        }
    }
}

/// The fixed day labels of every plan, in order.
pub const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// Generated plans carry untrusted numbers, so sums must not overflow.
fn saturating_sum(values: impl Iterator<Item = u32>) -> u32 {
    values.fold(0, u32::saturating_add)
}

fn average_of_week(total: u32) -> u32 {
    (f64::from(total) / WEEK_DAYS.len() as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(calories: u32, protein: u32, carbs: u32, fat: u32) -> Meal {
        Meal {
            slot: MealSlot::Lunch,
            name: "Test".to_string(),
            calories,
            protein,
            carbs,
            fat,
            prep_time: 10,
            image: String::new(),
            description: String::new(),
            ingredients: vec!["rice".to_string()],
            instructions: vec![],
            tags: vec![],
        }
    }

    #[test]
    fn day_totals_sum_meals() {
        let day = DayMealPlan::from_meals("Monday", vec![meal(100, 10, 20, 5), meal(250, 5, 30, 12)]);
        assert_eq!(day.total_calories, 350);
        assert_eq!(day.total_protein, 15);
        assert_eq!(day.total_carbs, 50);
        assert_eq!(day.total_fat, 17);
    }

    #[test]
    fn weekly_average_rounds_to_nearest() {
        assert_eq!(average_of_week(14_000), 2000);
        assert_eq!(average_of_week(14_004), 2001);
        assert_eq!(average_of_week(14_003), 2000);
    }

    #[test]
    fn meal_uses_wire_field_names() {
        let json = serde_json::to_value(meal(1, 2, 3, 4)).unwrap();
        assert_eq!(json["type"], "lunch");
        assert_eq!(json["prep_time"], 10);
        assert!(json.get("slot").is_none());
    }

    #[test]
    fn profile_parses_camel_case_and_rejects_unknown_diet() {
        let json = r#"{
            "age": 30, "gender": "other", "height": 170, "weight": 65,
            "activityLevel": "light", "goal": "lose", "dietType": "vegan",
            "allergies": ["nuts"], "restrictions": [], "mealsPerDay": 4,
            "cookingTime": "quick"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.gender, Gender::Other);
        assert_eq!(profile.diet_type, DietType::Vegan);
        assert_eq!(profile.budget, None);

        let bad = json.replace("\"vegan\"", "\"carnivore\"");
        assert!(serde_json::from_str::<UserProfile>(&bad).is_err());
    }
}
