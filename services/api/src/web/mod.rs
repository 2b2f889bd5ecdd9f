pub mod protocol;
pub mod rest;
pub mod state;

pub use rest::{generate_meal_plan_handler, nutrition_goals_handler, ping_handler};

use crate::error::ApiError;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the API routes with CORS and request tracing applied.
///
/// CORS is restricted to `CORS_ALLOWED_ORIGIN` when it is set and permissive otherwise.
pub fn api_router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let cors = match app_state.config.cors_allowed_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>().map_err(|e| {
                ApiError::Internal(format!("Invalid CORS origin '{}': {}", origin, e))
            })?)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]),
        None => CorsLayer::permissive(),
    };

    Ok(Router::new()
        .route("/api/ping", get(ping_handler))
        .route("/api/nutrition-goals", post(nutrition_goals_handler))
        .route("/api/generate-meal-plan", post(generate_meal_plan_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
