//! Infrastructure Layer
//!
//! PostgreSQL repositories, plus an in-memory implementation for tests.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod postgres;

pub use postgres::PgAuthRepository;
