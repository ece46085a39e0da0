//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword, UserName, UserPassword};
use crate::error::{AccountError, AccountResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<User> {
        if input.user_name.trim().is_empty() {
            return Err(AccountError::MissingField("username"));
        }
        if input.email.trim().is_empty() {
            return Err(AccountError::MissingField("email"));
        }
        if input.full_name.trim().is_empty() {
            return Err(AccountError::MissingField("fullName"));
        }
        if input.password.is_empty() {
            return Err(AccountError::MissingField("password"));
        }

        let user_name = UserName::new(&input.user_name)
            .map_err(|e| AccountError::Validation(e.to_string()))?;
        let email = Email::new(&input.email)?;

        // Duplicate checks on both unique identifiers
        if self.repo.exists_by_user_name(&user_name).await? {
            return Err(AccountError::UserNameTaken);
        }
        if self.repo.exists_by_email(&email).await? {
            return Err(AccountError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        let user = User::new(user_name, email, input.full_name.trim().to_string(), password_hash);

        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(user)
    }
}
