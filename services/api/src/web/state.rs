//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use meal_planner_core::MealPlanner;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
/// Nothing in it is mutated after startup; requests stay independent.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub planner: MealPlanner,
}
