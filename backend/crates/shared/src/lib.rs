//! Shared kernel for the blog backend.
//!
//! Holds the vocabulary every bounded context agrees on:
//! the unified [`error::app_error::AppError`] and typed ids.
//! Domain crates convert their own errors into `AppError` at the edge.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
