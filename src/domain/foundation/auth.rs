//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what the identity collaborator hands to the
//! core once a bearer token has been verified. The engine only ever reads
//! the `id`; the remaining claims are informational.

use super::UserId;
use thiserror::Error;

/// Principal extracted from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier issued by the identity service.
    pub id: UserId,

    /// Email claim, when the token carries one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The verification backend could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the client should obtain a new token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_keeps_claims() {
        let user = AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            Some("lifter@example.com".to_string()),
        );

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email.as_deref(), Some("lifter@example.com"));
    }

    #[test]
    fn auth_error_displays_message() {
        assert_eq!(format!("{}", AuthError::TokenExpired), "Token expired");
        assert_eq!(
            format!("{}", AuthError::service_unavailable("timeout")),
            "Auth service unavailable: timeout"
        );
    }

    #[test]
    fn token_errors_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }
}
