//! Post deletion by its author or an administrator.

use std::sync::Arc;

use auth::{Requester, can_act_on};

use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::{BlogError, BlogResult};

pub struct DeletePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> DeletePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self, requester: &Requester, post_id: &PostId) -> BlogResult<()> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)?;

        if !can_act_on(requester, &post) {
            return Err(BlogError::Forbidden);
        }

        if !self.post_repo.delete(post_id).await? {
            return Err(BlogError::PostNotFound);
        }

        tracing::info!(post_id = %post_id, actor = %requester.user_id, "Post deleted");
        Ok(())
    }
}
