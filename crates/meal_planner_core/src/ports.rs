//! crates/meal_planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! These traits form the boundary of the hexagonal architecture, keeping the planner
//! independent of any particular text-generation vendor.

use async_trait::async_trait;
use std::time::Duration;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, vendor SDKs).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("The service returned no content")]
    EmptyResponse,
    #[error("The service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends `prompt` under the given system instructions and returns the raw text reply.
    async fn generate_text(&self, system_instructions: &str, prompt: &str) -> PortResult<String>;
}
