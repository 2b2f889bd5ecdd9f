pub mod allergens;
pub mod catalog;
pub mod diet;
pub mod domain;
pub mod fallback;
pub mod nutrition;
pub mod parse;
pub mod planner;
pub mod ports;
pub mod prompt;
pub mod validation;

pub use catalog::{CatalogError, MealCatalog};
pub use domain::{
    ActivityLevel, Budget, CookingTime, DayMealPlan, DietType, Gender, Meal, MealSlot,
    NutritionGoals, UserProfile, WeeklyMealPlan, WeightGoal, WEEK_DAYS,
};
pub use nutrition::compute_goals;
pub use planner::{MealPlanner, PlanError, PlanSource, DEFAULT_GENERATION_TIMEOUT};
pub use ports::{PortError, PortResult, TextGenerationService};
pub use validation::{validate_profile, ValidationError};
