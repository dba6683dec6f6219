//! Session validation port for bearer token validation.
//!
//! This port defines the contract for validating access tokens and extracting
//! user identity. Tokens are minted by an external identity service; this
//! crate only verifies them.
//!
//! All implementations MUST reject expired tokens and tokens whose
//! signature does not verify.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this to validate Bearer tokens and hand the
/// resulting principal to the handlers.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token and return the authenticated user.
    ///
    /// `token` is the raw token, without the "Bearer " prefix.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
