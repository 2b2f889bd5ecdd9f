//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the planner front end and the API server.
//! Every response carries a `success` flag so clients can branch without inspecting
//! status codes.

use meal_planner_core::{NutritionGoals, UserProfile, WeeklyMealPlan};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Requests
//=========================================================================================

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealPlanRequest {
    #[schema(value_type = Object)]
    pub user_profile: UserProfile,
}

//=========================================================================================
// Responses
//=========================================================================================

#[derive(Serialize, Debug, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealPlanResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub meal_plan: WeeklyMealPlan,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct NutritionGoalsResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub goals: NutritionGoals,
}

/// Body of every 4xx/5xx response.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
