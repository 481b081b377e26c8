//! Application layer: one use case per file.

pub mod config;
pub mod create_post;
pub mod delete_post;
pub mod query_posts;
pub mod seed_posts;
pub mod update_post;

pub use config::BlogConfig;
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use query_posts::QueryPostsUseCase;
pub use seed_posts::SeedPostsUseCase;
pub use update_post::{UpdatePostInput, UpdatePostUseCase};

#[cfg(test)]
pub(crate) mod test_support;
