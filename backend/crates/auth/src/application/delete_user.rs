//! Account deletion.

use std::sync::Arc;

use crate::domain::policy::{Requester, can_act_on_user};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Fails with `UserHasPosts` while the user still authors posts.
    pub async fn execute(&self, requester: &Requester, target: &UserId) -> AuthResult<()> {
        if !can_act_on_user(requester, target) {
            return Err(AuthError::Forbidden);
        }

        if !self.user_repo.delete(target).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %target, actor = %requester.user_id, "User deleted");
        Ok(())
    }
}
