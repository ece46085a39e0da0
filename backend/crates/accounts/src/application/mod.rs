//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod change_password;
pub mod config;
pub mod login;
pub mod logout;
pub mod refresh_session;
pub mod register;

// Re-exports
pub use authorize::AuthorizeUseCase;
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AccountsConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh_session::{RefreshSessionOutput, RefreshSessionUseCase};
pub use register::{RegisterInput, RegisterUseCase};
