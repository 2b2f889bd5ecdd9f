//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::web::protocol::{
    ErrorResponse, GenerateMealPlanRequest, GenerateMealPlanResponse, NutritionGoalsResponse,
    PingResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use meal_planner_core::{UserProfile, ValidationError};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        ping_handler,
        nutrition_goals_handler,
        generate_meal_plan_handler,
    ),
    components(
        schemas(
            PingResponse,
            GenerateMealPlanRequest,
            GenerateMealPlanResponse,
            NutritionGoalsResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "NutriPlan API", description = "Nutrition targets and weekly meal plans.")
    )
)]
pub struct ApiDoc;

/// Maps a body that failed to deserialize onto the validation error path.
fn malformed(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(ValidationError::Malformed(rejection.body_text()))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness check.
#[utoipa::path(
    get,
    path = "/api/ping",
    responses((status = 200, description = "Server is up", body = PingResponse))
)]
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}

/// Compute daily calorie and macro targets for a profile.
///
/// The request body is a bare user profile, the same object nested under
/// `userProfile` in the meal-plan request.
#[utoipa::path(
    post,
    path = "/api/nutrition-goals",
    request_body = Object,
    responses(
        (status = 200, description = "Targets computed", body = NutritionGoalsResponse),
        (status = 400, description = "Missing or invalid profile", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn nutrition_goals_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<NutritionGoalsResponse>, ApiError> {
    let Json(profile) = payload.map_err(malformed)?;
    let goals = app_state.planner.goals_for(&profile)?;

    Ok(Json(NutritionGoalsResponse {
        success: true,
        goals,
    }))
}

/// Generate a 7-day meal plan.
///
/// Uses the text generation service when one is configured and falls back to the
/// built-in catalog whenever that path fails, so a valid profile always gets a plan.
#[utoipa::path(
    post,
    path = "/api/generate-meal-plan",
    request_body = GenerateMealPlanRequest,
    responses(
        (status = 200, description = "Plan generated", body = GenerateMealPlanResponse),
        (status = 400, description = "Missing or invalid profile", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn generate_meal_plan_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateMealPlanRequest>, JsonRejection>,
) -> Result<Json<GenerateMealPlanResponse>, ApiError> {
    let Json(request) = payload.map_err(malformed)?;
    let (meal_plan, source) = app_state.planner.plan_week(&request.user_profile).await?;
    info!(
        ?source,
        weekly_calories = meal_plan.total_weekly_calories,
        "Meal plan ready"
    );

    Ok(Json(GenerateMealPlanResponse {
        success: true,
        meal_plan,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_every_route() {
        let json = ApiDoc::openapi().to_json().unwrap();
        for path in ["/api/ping", "/api/nutrition-goals", "/api/generate-meal-plan"] {
            assert!(json.contains(path), "{path} missing from the OpenAPI document");
        }
        assert!(json.contains("ErrorResponse"));
    }
}
