//! services/api/src/bin/api.rs

use api_lib::{
    adapters::OpenAiTextAdapter,
    config::Config,
    error::ApiError,
    web::{api_router, rest::ApiDoc, state::AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::Router;
use meal_planner_core::{MealCatalog, MealPlanner};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Load the Meal Catalog ---
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "Loading meal catalog from file");
            MealCatalog::from_file(path)?
        }
        None => MealCatalog::builtin()?,
    };
    info!(version = %catalog.version, "Meal catalog ready");

    // --- 3. Initialize the Planner and Its Text Generation Adapter ---
    let mut planner = MealPlanner::new(Arc::new(catalog));
    match &config.openai_api_key {
        Some(api_key) => {
            let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
            let text_adapter = Arc::new(OpenAiTextAdapter::new(
                openai_client,
                config.meal_plan_model.clone(),
            ));
            planner = planner.with_text_generator(text_adapter, config.generation_timeout);
            info!(model = %config.meal_plan_model, "Text generation enabled");
        }
        None => warn!("No OPENAI_API_KEY configured; meal plans will come from the catalog"),
    }

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        planner,
    });

    // --- 5. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router(app_state)?)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
