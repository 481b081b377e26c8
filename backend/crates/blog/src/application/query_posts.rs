//! Public read side: listings and single posts.

use std::sync::Arc;

use crate::application::config::BlogConfig;
use crate::domain::entity::post::Post;
use crate::domain::repository::{AuthoredPost, PostRepository};
use crate::domain::value_object::post_id::PostId;
use crate::domain::view::{FullPost, PostPreview};
use crate::error::BlogResult;

pub struct QueryPostsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
    config: Arc<BlogConfig>,
}

impl<P> QueryPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>, config: Arc<BlogConfig>) -> Self {
        Self { post_repo, config }
    }

    /// Newest first. Empty when there are no posts.
    pub async fn list_previews(&self) -> BlogResult<Vec<PostPreview>> {
        let posts = self.post_repo.list_with_authors().await?;
        Ok(posts
            .iter()
            .map(|p| PostPreview::new(p, self.config.preview_length))
            .collect())
    }

    pub async fn get_full(&self, post_id: &PostId) -> BlogResult<Option<FullPost>> {
        let post = self.post_repo.find_with_author(post_id).await?;
        Ok(post.map(FullPost::from))
    }

    /// Full view of a post just written, with the author's current label.
    pub async fn present(&self, post: Post) -> BlogResult<FullPost> {
        let author_display_name = self.post_repo.author_display_name(&post.author_id).await?;
        Ok(FullPost::from(AuthoredPost {
            post,
            author_display_name,
        }))
    }
}
