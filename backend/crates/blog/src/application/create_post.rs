//! Post creation.

use std::sync::Arc;

use auth::Requester;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_content::PostContent;
use crate::error::{BlogError, BlogResult};

/// There is no author field: the author is always the requester.
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
}

pub struct CreatePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> CreatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self, requester: &Requester, input: CreatePostInput) -> BlogResult<Post> {
        let body = PostContent::new(input.title, input.content)?;

        let author = self
            .post_repo
            .author_display_name(&requester.user_id)
            .await?
            .ok_or(BlogError::Unauthenticated)?;

        let post = Post::new(requester.user_id, author, body);
        self.post_repo.create(&post).await?;

        tracing::info!(
            post_id = %post.post_id,
            author_id = %post.author_id,
            "Post created"
        );
        Ok(post)
    }
}
