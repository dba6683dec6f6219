//! Authentication configuration
//!
//! Bearer tokens are HS256 JWTs minted by the identity service with a shared
//! secret.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::adapters::auth::JwtConfig;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the token issuer
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim, if any
    #[serde(default)]
    pub issuer: Option<String>,
}

impl AuthConfig {
    /// Settings for the JWT adapter.
    pub fn jwt_config(&self) -> JwtConfig {
        let config = JwtConfig::new(self.jwt_secret.clone());
        match &self.issuer {
            Some(issuer) => config.with_issuer(issuer.clone()),
            None => config,
        }
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        Ok(())
    }
}
