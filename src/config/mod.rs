//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `WORKOUT_PLANNER`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use workout_planner::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod limits;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use limits::LimitsConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "WORKOUT_PLANNER";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL settings; workouts stay in memory when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    pub auth: AuthConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` first when present, then every variable with the
    /// `WORKOUT_PLANNER` prefix:
    ///
    /// - `WORKOUT_PLANNER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `WORKOUT_PLANNER__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.limits.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "WORKOUT_PLANNER__AUTH__JWT_SECRET",
        "WORKOUT_PLANNER__SERVER__PORT",
        "WORKOUT_PLANNER__SERVER__ENVIRONMENT",
        "WORKOUT_PLANNER__DATABASE__URL",
        "WORKOUT_PLANNER__LIMITS__MAX_DAYS",
    ];

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        for key in VARS {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config = load_with(&[("WORKOUT_PLANNER__AUTH__JWT_SECRET", "dev-secret")]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.database.is_none());
        assert_eq!(config.limits, LimitsConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_values_are_read() {
        let config = load_with(&[
            ("WORKOUT_PLANNER__AUTH__JWT_SECRET", "dev-secret"),
            ("WORKOUT_PLANNER__SERVER__PORT", "3000"),
            ("WORKOUT_PLANNER__DATABASE__URL", "postgres://localhost/workouts"),
            ("WORKOUT_PLANNER__LIMITS__MAX_DAYS", "5"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.database.map(|d| d.url),
            Some("postgres://localhost/workouts".to_string())
        );
        assert_eq!(config.limits.max_days, 5);
    }

    #[test]
    fn missing_secret_fails_to_load() {
        assert!(load_with(&[]).is_err());
    }

    #[test]
    fn production_requires_long_secret() {
        let config = load_with(&[
            ("WORKOUT_PLANNER__AUTH__JWT_SECRET", "short"),
            ("WORKOUT_PLANNER__SERVER__ENVIRONMENT", "production"),
        ])
        .unwrap();

        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN))
        );
    }
}
