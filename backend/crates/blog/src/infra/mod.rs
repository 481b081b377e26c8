//! Infrastructure Layer
//!
//! PostgreSQL repository, plus an in-memory implementation for tests.

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgPostRepository;
