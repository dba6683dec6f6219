//! Shared-secret JWT adapter for bearer token validation.
//!
//! Tokens are minted by the external identity service and signed with
//! HS256 using a secret both sides know. This adapter:
//!
//! 1. Verifies the signature against the configured secret
//! 2. Requires `exp` and rejects expired tokens
//! 3. Checks `iss` when an issuer is configured
//! 4. Takes the principal from `sub`, or from the legacy `userId` claim
//!
//! # Example
//!
//! ```ignore
//! let validator = JwtSessionValidator::new(JwtConfig::new(secret));
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Configuration for the JWT adapter.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret shared with the token issuer.
    pub secret: Secret<String>,

    /// Expected `iss` claim. Not checked when `None`.
    pub issuer: Option<String>,
}

impl JwtConfig {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            secret,
            issuer: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// Claims read from incoming tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,

    /// Principal claim used by older token issuers.
    #[serde(default, rename = "userId")]
    user_id: Option<String>,

    exp: i64,

    #[serde(default)]
    email: Option<String>,
}

/// HS256 session validator.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        match &config.issuer {
            Some(issuer) => {
                validation.set_issuer(&[issuer]);
                validation.set_required_spec_claims(&["exp", "iss"]);
            }
            None => validation.set_required_spec_claims(&["exp"]),
        }

        Self {
            decoding_key,
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let subject = claims.sub.or(claims.user_id).ok_or_else(|| {
            tracing::warn!("Token carries neither 'sub' nor 'userId'");
            AuthError::InvalidToken
        })?;

        let user_id = UserId::new(subject).map_err(|_| {
            tracing::warn!("Blank user ID in token");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.email))
    }
}
