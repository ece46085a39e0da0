//! Change Password Use Case
//!
//! Re-authenticates with the current password before accepting the new
//! one. Existing sessions survive a password change; only the stored
//! hash is replaced.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, UserId, UserPassword};
use crate::error::{AccountError, AccountResult};

pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        input: ChangePasswordInput,
    ) -> AccountResult<()> {
        if input.old_password.is_empty() {
            return Err(AccountError::MissingField("oldPassword"));
        }
        if input.new_password.is_empty() {
            return Err(AccountError::MissingField("newPassword"));
        }

        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let old = RawPassword::new(input.old_password)
            .map_err(|_| AccountError::InvalidCredentials)?;
        if !user.password_hash.verify(&old, self.config.pepper()) {
            return Err(AccountError::InvalidCredentials);
        }

        let new = RawPassword::new(input.new_password)
            .map_err(|e| AccountError::Validation(e.to_string()))?;
        let hash = UserPassword::from_raw(&new, self.config.pepper())?;

        self.repo.update_password_hash(user_id, &hash).await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
