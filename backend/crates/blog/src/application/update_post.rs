//! Post editing by its author or an administrator.

use std::sync::Arc;

use auth::{Requester, can_act_on};

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{post_content::PostContent, post_id::PostId};
use crate::error::{BlogError, BlogResult};

pub struct UpdatePostInput {
    pub title: String,
    pub content: String,
}

pub struct UpdatePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> UpdatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// `Ok(None)` when the post does not exist. Only title, content and
    /// `last_modified_at` change.
    pub async fn execute(
        &self,
        requester: &Requester,
        post_id: &PostId,
        input: UpdatePostInput,
    ) -> BlogResult<Option<Post>> {
        let Some(mut post) = self.post_repo.find_by_id(post_id).await? else {
            return Ok(None);
        };

        if !can_act_on(requester, &post) {
            tracing::info!(
                post_id = %post_id,
                requester = %requester.user_id,
                "Update refused: not author or admin"
            );
            return Err(BlogError::Forbidden);
        }

        post.edit(PostContent::new(input.title, input.content)?);

        if !self.post_repo.update(&post).await? {
            return Ok(None);
        }

        tracing::info!(post_id = %post_id, actor = %requester.user_id, "Post updated");
        Ok(Some(post))
    }
}
