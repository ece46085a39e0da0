//! In-Memory Repository Implementation
//!
//! Mutex-protected map keyed by user id. Every repository call takes the
//! single lock, so the refresh-token compare-and-swap is atomic here by
//! construction.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserId, UserName, UserPassword};
use crate::error::{AccountError, AccountResult};

/// In-memory user repository for tests and local development
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AccountResult<std::sync::MutexGuard<'_, HashMap<Uuid, User>>> {
        self.users
            .lock()
            .map_err(|_| AccountError::Internal("User store lock poisoned".into()))
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let mut users = self.lock()?;

        if users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical())
        {
            return Err(AccountError::UserNameTaken);
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(AccountError::EmailTaken);
        }

        users.insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        Ok(self.lock()?.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        Ok(self
            .lock()?
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AccountResult<Option<User>> {
        Ok(self
            .lock()?
            .values()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        Ok(self.lock()?.values().any(|u| &u.email == email))
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountResult<bool> {
        Ok(self
            .lock()?
            .values()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }

    async fn update_password_hash(
        &self,
        user_id: &UserId,
        hash: &UserPassword,
    ) -> AccountResult<()> {
        let mut users = self.lock()?;
        let user = users
            .get_mut(user_id.as_uuid())
            .ok_or(AccountError::UserNotFound)?;

        user.password_hash = hash.clone();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn refresh_token(&self, user_id: &UserId) -> AccountResult<Option<String>> {
        Ok(self
            .lock()?
            .get(user_id.as_uuid())
            .and_then(|u| u.current_refresh_token.clone()))
    }

    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        token: Option<&str>,
    ) -> AccountResult<()> {
        let mut users = self.lock()?;
        if let Some(user) = users.get_mut(user_id.as_uuid()) {
            user.current_refresh_token = token.map(String::from);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn swap_refresh_token(
        &self,
        user_id: &UserId,
        expected: &str,
        replacement: &str,
    ) -> AccountResult<bool> {
        let mut users = self.lock()?;
        let Some(user) = users.get_mut(user_id.as_uuid()) else {
            return Ok(false);
        };

        // Compare and replace under the same lock acquisition
        if user.current_refresh_token.as_deref() != Some(expected) {
            return Ok(false);
        }

        user.current_refresh_token = Some(replacement.to_string());
        user.updated_at = Utc::now();
        Ok(true)
    }
}
