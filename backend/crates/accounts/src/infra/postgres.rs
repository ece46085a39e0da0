//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserId, UserName, UserPassword};
use crate::error::{AccountError, AccountResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                user_name_canonical,
                email,
                full_name,
                password_hash,
                current_refresh_token,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_str())
        .bind(&user.full_name)
        .bind(user.password_hash.as_phc_string())
        .bind(user.current_refresh_token.as_deref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                user_name_canonical,
                email,
                full_name,
                password_hash,
                current_refresh_token,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                user_name_canonical,
                email,
                full_name,
                password_hash,
                current_refresh_token,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                user_name_canonical,
                email,
                full_name,
                password_hash,
                current_refresh_token,
                created_at,
                updated_at
            FROM users
            WHERE user_name_canonical = $1
            "#,
        )
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_password_hash(
        &self,
        user_id: &UserId,
        hash: &UserPassword,
    ) -> AccountResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(hash.as_phc_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AccountError::UserNotFound);
        }

        Ok(())
    }

    async fn refresh_token(&self, user_id: &UserId) -> AccountResult<Option<String>> {
        let token = sqlx::query_scalar::<_, Option<String>>(
            "SELECT current_refresh_token FROM users WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(token.flatten())
    }

    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        token: Option<&str>,
    ) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                current_refresh_token = $2,
                updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(token)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn swap_refresh_token(
        &self,
        user_id: &UserId,
        expected: &str,
        replacement: &str,
    ) -> AccountResult<bool> {
        // Single conditional UPDATE; row-level locking makes this the
        // compare-and-swap. Concurrent swaps with the same `expected`
        // serialize on the row and at most one sees it match.
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                current_refresh_token = $3,
                updated_at = $4
            WHERE user_id = $1 AND current_refresh_token = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(expected)
        .bind(replacement)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    #[allow(dead_code)]
    user_name_canonical: String,
    email: String,
    full_name: String,
    password_hash: String,
    current_refresh_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AccountError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(&self.user_name),
            email: Email::from_db(self.email),
            full_name: self.full_name,
            password_hash,
            current_refresh_token: self.current_refresh_token,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
