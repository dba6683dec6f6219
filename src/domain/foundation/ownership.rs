//! Ownership guard for user-owned aggregates.
//!
//! Every mutation of a workout, and every read of a single workout, goes
//! through `check_ownership` before anything else happens:
//!
//! ```ignore
//! let workout = repo.find_by_id(&id).await?.ok_or(...)?;
//! workout.check_ownership(&principal)?;  // Err(Forbidden) if not owner
//! ```
//!
//! The guard is pure: it never changes the aggregate it inspects.

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
///
/// Designed for single-owner resources only; there is no notion of shared
/// or delegated access.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning `Forbidden` if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", user_id.to_string()))
        }
    }
}
