//! Logout Use Case
//!
//! Destroys the server side of a session by clearing the user's refresh
//! token anchor. The signed tokens themselves stay cryptographically valid
//! until natural expiry; clearing the anchor is what makes the refresh
//! token permanently unusable.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::AccountResult;

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> LogoutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Clear the session anchor. Idempotent: logging out without a live
    /// session is not an error.
    pub async fn execute(&self, user_id: &UserId) -> AccountResult<()> {
        self.repo.set_refresh_token(user_id, None).await?;

        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }
}
