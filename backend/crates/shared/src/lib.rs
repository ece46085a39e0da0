//! Shared kernel - the minimal core every domain crate agrees on
//!
//! - Unified error type ([`error::app_error::AppError`]) and HTTP-facing
//!   error classification ([`error::kind::ErrorKind`])
//! - Typed entity identifiers ([`id::Id`])
//!
//! Only vocabulary that is hard to change and means the same thing in every
//! domain belongs here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
