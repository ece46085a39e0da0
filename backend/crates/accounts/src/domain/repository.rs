//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::User;
use crate::domain::value_object::{Email, UserId, UserName, UserPassword};
use crate::error::AccountResult;

/// User repository trait
///
/// Covers the user store and the session anchor (the per-user
/// `current_refresh_token` column).
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AccountResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Find user by user name (canonical, case-insensitive)
    async fn find_by_user_name(&self, user_name: &UserName) -> AccountResult<Option<User>>;

    /// Check if email is registered
    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountResult<bool>;

    /// Replace the stored password hash
    async fn update_password_hash(
        &self,
        user_id: &UserId,
        hash: &UserPassword,
    ) -> AccountResult<()>;

    // ========================================================================
    // Session anchor
    // ========================================================================

    /// Read the currently-valid refresh token, if any
    async fn refresh_token(&self, user_id: &UserId) -> AccountResult<Option<String>>;

    /// Unconditionally overwrite the stored refresh token (login/logout)
    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        token: Option<&str>,
    ) -> AccountResult<()>;

    /// Atomically replace the stored refresh token only if it still equals
    /// `expected`. Returns false when the stored value differs (the token
    /// was already rotated out, cleared by logout, or the user is gone).
    ///
    /// Rotation must go through this compare-and-swap: of two concurrent
    /// refreshes presenting the same token, exactly one may win.
    async fn swap_refresh_token(
        &self,
        user_id: &UserId,
        expected: &str,
        replacement: &str,
    ) -> AccountResult<bool>;
}
