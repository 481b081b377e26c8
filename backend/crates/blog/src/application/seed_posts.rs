//! Sample content for a fresh installation.

use std::sync::Arc;

use auth::domain::value_object::user_id::UserId;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_content::PostContent;
use crate::error::BlogResult;

const SAMPLE_POSTS: &[(&str, &str)] = &[
    ("Hello World", "This is the first blog post!"),
    (
        "Docker is awesome",
        "Running fullstack apps with containers is easy.",
    ),
];

pub struct SeedPostsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> SeedPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Writes the sample posts when no post exists yet. Returns how many
    /// were created.
    pub async fn execute(&self, author_id: UserId, author: &str) -> BlogResult<usize> {
        if self.post_repo.count().await? > 0 {
            tracing::debug!("Posts already present, skipping samples");
            return Ok(0);
        }

        for (title, content) in SAMPLE_POSTS {
            let post = Post::new(author_id, author, PostContent::new(*title, *content)?);
            self.post_repo.create(&post).await?;
        }

        tracing::info!(count = SAMPLE_POSTS.len(), "Sample posts created");
        Ok(SAMPLE_POSTS.len())
    }
}
