//! Blog posts: listing, reading, writing.
//!
//! Clean Architecture structure:
//! - `domain/` - Post entity, preview rule, read views, repository trait
//! - `application/` - Use cases
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Ownership checks use the policy from the `auth` crate: the author or an
//! administrator may change a post; anyone may read.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::{BlogConfig, SeedPostsUseCase};
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgPostRepository;
pub use presentation::router::{blog_router, blog_router_generic};
