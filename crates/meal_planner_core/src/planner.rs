//! crates/meal_planner_core/src/planner.rs
//!
//! Entry point for plan generation.
//!
//! A `MealPlanner` either delegates to a configured `TextGenerationService` or goes
//! straight to the catalog-driven fallback. Any failure on the delegated path (error,
//! timeout, unusable text) is logged and replaced by the fallback plan, so callers only
//! ever see validation errors or a broken catalog.

use crate::catalog::MealCatalog;
use crate::domain::{NutritionGoals, UserProfile, WeeklyMealPlan};
use crate::fallback::{generate_fallback_plan, FallbackError};
use crate::nutrition::compute_goals;
use crate::parse::{parse_generated_plan, PlanRejection};
use crate::ports::{PortError, TextGenerationService};
use crate::prompt::{build_prompt, SYSTEM_INSTRUCTIONS};
use crate::validation::{validate_profile, ValidationError};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("fallback generation failed: {0}")]
    Fallback(#[from] FallbackError),
}

/// Why the delegated path was abandoned.
#[derive(Debug, thiserror::Error)]
pub enum ExternalFailure {
    #[error(transparent)]
    Port(#[from] PortError),
    #[error(transparent)]
    Rejected(#[from] PlanRejection),
}

/// Which strategy produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    TextGeneration,
    Fallback,
}

#[derive(Clone)]
pub struct MealPlanner {
    catalog: Arc<MealCatalog>,
    text_generator: Option<Arc<dyn TextGenerationService>>,
    timeout: Duration,
}

impl MealPlanner {
    /// A planner that always uses the catalog.
    pub fn new(catalog: Arc<MealCatalog>) -> Self {
        Self {
            catalog,
            text_generator: None,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Delegates to `generator`, waiting at most `timeout` for each reply.
    pub fn with_text_generator(
        mut self,
        generator: Arc<dyn TextGenerationService>,
        timeout: Duration,
    ) -> Self {
        self.text_generator = Some(generator);
        self.timeout = timeout;
        self
    }

    /// Validates `profile` and computes its daily targets.
    pub fn goals_for(&self, profile: &UserProfile) -> Result<NutritionGoals, ValidationError> {
        validate_profile(profile)?;
        Ok(compute_goals(profile))
    }

    pub async fn generate_plan(&self, profile: &UserProfile) -> Result<WeeklyMealPlan, PlanError> {
        self.plan_week(profile).await.map(|(plan, _)| plan)
    }

    /// Like [`generate_plan`](Self::generate_plan), also reporting which strategy won.
    pub async fn plan_week(
        &self,
        profile: &UserProfile,
    ) -> Result<(WeeklyMealPlan, PlanSource), PlanError> {
        let goals = self.goals_for(profile)?;

        if let Some(generator) = &self.text_generator {
            info!(diet = %profile.diet_type, "Generating meal plan with the text generation service");
            match self.try_text_generation(generator.as_ref(), profile, &goals).await {
                Ok(plan) => {
                    info!("Generated meal plan accepted");
                    return Ok((plan, PlanSource::TextGeneration));
                }
                Err(e) => warn!(error = %e, "Text generation failed, using fallback meal plan"),
            }
        } else {
            info!("No text generation service configured, using fallback meal plan");
        }

        let plan = generate_fallback_plan(&self.catalog, profile, &goals, Utc::now())?;
        Ok((plan, PlanSource::Fallback))
    }

    async fn try_text_generation(
        &self,
        generator: &dyn TextGenerationService,
        profile: &UserProfile,
        goals: &NutritionGoals,
    ) -> Result<WeeklyMealPlan, ExternalFailure> {
        let now = Utc::now();
        let prompt = build_prompt(profile, goals, now);

        let reply = tokio::time::timeout(
            self.timeout,
            generator.generate_text(SYSTEM_INSTRUCTIONS, &prompt),
        )
        .await
        .map_err(|_| PortError::Timeout(self.timeout))??;

        debug!(bytes = reply.len(), "Received text generation reply");
        if reply.trim().is_empty() {
            return Err(PortError::EmptyResponse.into());
        }
        Ok(parse_generated_plan(&reply, profile, now)?)
    }
}
