//! Repository trait.
//!
//! Implemented by `infra::postgres::PgPostRepository` and, for tests,
//! `infra::memory::InMemoryPostRepository`.

use auth::domain::value_object::user_id::UserId;

use crate::domain::entity::post::Post;
use crate::domain::value_object::post_id::PostId;
use crate::error::BlogResult;

/// A post together with its author's current display name, `None` when the
/// author link does not resolve.
#[derive(Debug, Clone)]
pub struct AuthoredPost {
    pub post: Post,
    pub author_display_name: Option<String>,
}

impl AuthoredPost {
    pub fn author_label(&self) -> &str {
        self.author_display_name
            .as_deref()
            .unwrap_or(&self.post.author)
    }
}

#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// All posts, newest `created_at` first.
    async fn list_with_authors(&self) -> BlogResult<Vec<AuthoredPost>>;

    async fn find_with_author(&self, post_id: &PostId) -> BlogResult<Option<AuthoredPost>>;

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>>;

    async fn create(&self, post: &Post) -> BlogResult<()>;

    /// Writes title, content and `last_modified_at`. Returns `false` when
    /// the post no longer exists.
    async fn update(&self, post: &Post) -> BlogResult<bool>;

    /// Returns `false` when the post does not exist.
    async fn delete(&self, post_id: &PostId) -> BlogResult<bool>;

    async fn count(&self) -> BlogResult<i64>;

    async fn author_display_name(&self, author_id: &UserId) -> BlogResult<Option<String>>;
}
