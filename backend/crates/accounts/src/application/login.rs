//! Login Use Case
//!
//! Verifies credentials and opens a session: issues a fresh access/refresh
//! pair and persists the refresh token as the user's session anchor.

use std::sync::Arc;

use platform::token::{TokenCodec, TokenPurpose};

use crate::application::config::AccountsConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword, UserName};
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    /// User name or email
    pub identifier: String,
    /// Password
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// The authenticated user (handlers strip sensitive fields)
    pub user: User,
    /// Fresh access token
    pub access_token: String,
    /// Fresh refresh token, already persisted as the session anchor
    pub refresh_token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
    config: Arc<AccountsConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<TokenCodec>, config: Arc<AccountsConfig>) -> Self {
        Self {
            repo,
            codec,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        if input.identifier.trim().is_empty() {
            return Err(AccountError::MissingField("identifier"));
        }
        if input.password.is_empty() {
            return Err(AccountError::MissingField("password"));
        }

        // Resolve by email or user name. A missing user is NotFound here;
        // the handler surface decides how much of that to reveal.
        let user = if input.identifier.contains('@') {
            let email = Email::new(&input.identifier)
                .map_err(|_| AccountError::UserNotFound)?;
            self.repo.find_by_email(&email).await?
        } else {
            let user_name = UserName::new(&input.identifier)
                .map_err(|_| AccountError::UserNotFound)?;
            self.repo.find_by_user_name(&user_name).await?
        };

        let user = user.ok_or(AccountError::UserNotFound)?;

        // A password failing today's policy cannot belong to any account
        let raw_password = RawPassword::new(input.password)
            .map_err(|_| AccountError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AccountError::InvalidCredentials);
        }

        let subject = user.user_id.to_string();
        let access_token = self.codec.issue(&subject, TokenPurpose::Access)?;
        let refresh_token = self.codec.issue(&subject, TokenPurpose::Refresh)?;

        // One active refresh token per user: overwrite any prior anchor
        self.repo
            .set_refresh_token(&user.user_id, Some(&refresh_token))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User logged in"
        );

        Ok(LoginOutput {
            user,
            access_token,
            refresh_token,
        })
    }
}
