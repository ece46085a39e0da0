//! Refresh Session Use Case
//!
//! Exchanges a valid refresh token for a fresh access/refresh pair,
//! rotating the stored anchor with a compare-and-swap so that exactly one
//! concurrent caller wins per stored value.

use std::sync::Arc;

use platform::token::{TokenCodec, TokenPurpose};
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AccountError, AccountResult};

/// The freshly rotated token pair.
#[derive(Debug)]
pub struct RefreshSessionOutput {
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh session use case
pub struct RefreshSessionUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    codec: Arc<TokenCodec>,
}

impl<R> RefreshSessionUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, codec: Arc<TokenCodec>) -> Self {
        Self { repo, codec }
    }

    /// Rotate the session. The presented token must carry the refresh
    /// purpose, verify against the refresh key, and match the stored
    /// anchor at swap time. A signature-valid token that lost the swap
    /// has been superseded or revoked and is rejected.
    pub async fn execute(&self, presented: &str) -> AccountResult<RefreshSessionOutput> {
        let claims = self.codec.verify(presented, TokenPurpose::Refresh)?;

        let user_id: UserId = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AccountError::TokenInvalid)?
            .into();

        // Issue the replacement pair before touching storage so the swap
        // is a single atomic step with no read-then-write window.
        let subject = user_id.to_string();
        let access_token = self.codec.issue(&subject, TokenPurpose::Access)?;
        let refresh_token = self.codec.issue(&subject, TokenPurpose::Refresh)?;

        let swapped = self
            .repo
            .swap_refresh_token(&user_id, presented, &refresh_token)
            .await?;
        if !swapped {
            tracing::warn!(user_id = %user_id, "Refresh token does not match stored session");
            return Err(AccountError::TokenRevoked);
        }

        tracing::info!(user_id = %user_id, "Session refreshed");
        Ok(RefreshSessionOutput {
            access_token,
            refresh_token,
        })
    }
}
