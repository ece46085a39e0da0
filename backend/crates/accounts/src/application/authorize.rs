//! Authorize Use Case
//!
//! Resolves a bearer access token to the user it names. Used by the
//! authentication middleware in front of protected routes.

use std::sync::Arc;

use platform::token::{TokenCodec, TokenPurpose};
use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AccountError, AccountResult};

/// Authorize use case
pub struct AuthorizeUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
}

impl<R> AuthorizeUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<TokenCodec>) -> Self {
        Self { repo, codec }
    }

    /// Verify the access token and load the user behind it. A token whose
    /// subject no longer resolves to a user is treated as invalid.
    pub async fn execute(&self, token: &str) -> AccountResult<User> {
        let claims = self.codec.verify(token, TokenPurpose::Access)?;

        let user_id: UserId = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AccountError::TokenInvalid)?
            .into();

        self.repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AccountError::TokenInvalid)
    }
}
