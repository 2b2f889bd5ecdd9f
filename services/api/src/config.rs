//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// Placeholder key shipped in sample `.env` files; treated the same as no key at all.
const DEMO_API_KEY: &str = "demo_key";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// `None` when no usable key is set, which disables the text-generation path.
    pub openai_api_key: Option<String>,
    pub meal_plan_model: String,
    pub generation_timeout: Duration,
    /// Replacement for the built-in meal catalog.
    pub catalog_path: Option<PathBuf>,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN").filter(|v| !v.trim().is_empty());

        // --- Text Generation Settings ---
        let openai_api_key = lookup("OPENAI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != DEMO_API_KEY);

        let meal_plan_model =
            lookup("MEAL_PLAN_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string());

        let generation_timeout = match lookup("GENERATION_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "GENERATION_TIMEOUT_SECS".to_string(),
                        format!("'{}' is not a positive number of seconds", raw),
                    ))
                }
            },
            None => meal_planner_core::DEFAULT_GENERATION_TIMEOUT,
        };

        // --- Meal Catalog ---
        let catalog_path = lookup("MEAL_CATALOG_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_address,
            log_level,
            openai_api_key,
            meal_plan_model,
            generation_timeout,
            catalog_path,
            cors_allowed_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.meal_plan_model, "gpt-4o-mini");
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert!(config.catalog_path.is_none());
        assert!(config.cors_allowed_origin.is_none());
    }

    #[test]
    fn demo_and_blank_keys_mean_no_key() {
        assert_eq!(load(&[("OPENAI_API_KEY", "demo_key")]).unwrap().openai_api_key, None);
        assert_eq!(load(&[("OPENAI_API_KEY", "  ")]).unwrap().openai_api_key, None);
        assert_eq!(
            load(&[("OPENAI_API_KEY", "sk-test")]).unwrap().openai_api_key.as_deref(),
            Some("sk-test")
        );
    }

    #[test]
    fn timeout_must_be_positive() {
        assert_eq!(
            load(&[("GENERATION_TIMEOUT_SECS", "12")]).unwrap().generation_timeout,
            Duration::from_secs(12)
        );
        for bad in ["0", "-5", "soon"] {
            assert!(matches!(
                load(&[("GENERATION_TIMEOUT_SECS", bad)]),
                Err(ConfigError::InvalidValue(var, _)) if var == "GENERATION_TIMEOUT_SECS"
            ));
        }
    }

    #[test]
    fn rejects_bad_bind_address_and_log_level() {
        assert!(matches!(
            load(&[("BIND_ADDRESS", "nowhere")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "BIND_ADDRESS"
        ));
        assert!(matches!(
            load(&[("RUST_LOG", "chatty")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "RUST_LOG"
        ));
    }
}
