//! Accounts Backend Module
//!
//! Credential verification and login-session lifecycle.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - Repository implementations (PostgreSQL, in-memory)
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with username or email + password
//! - Dual-token sessions: short-lived access JWT + long-lived refresh JWT
//! - Refresh-token rotation on every use
//! - Server-side revocation: at most one valid refresh token per user
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Token purpose is part of the signed payload; purposes use independent
//!   signing keys
//! - Refresh validation requires exact match against the stored token, so a
//!   rotated-out or logged-out token dies before its natural expiry
//! - Rotation persists through an atomic compare-and-swap; of two
//!   concurrent refreshes with the same token, exactly one wins

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use error::{AccountError, AccountResult};
pub use infra::memory::InMemoryUserRepository;
pub use infra::postgres::PgUserRepository;
pub use presentation::router::accounts_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
