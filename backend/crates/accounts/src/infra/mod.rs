//! Infrastructure Layer
//!
//! Repository implementations: PostgreSQL for production, in-memory for
//! tests and local experiments.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
