//! Read-side user queries.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::policy::{Requester, can_act_on_user};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct QueryUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> QueryUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Self or admin.
    pub async fn get(&self, requester: &Requester, user_id: &UserId) -> AuthResult<User> {
        if !can_act_on_user(requester, user_id) {
            return Err(AuthError::Forbidden);
        }
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn me(&self, requester: &Requester) -> AuthResult<User> {
        self.get(requester, &requester.user_id).await
    }

    /// Admin only.
    pub async fn list_all(&self, requester: &Requester) -> AuthResult<Vec<User>> {
        if !requester.is_admin() {
            return Err(AuthError::AdminRequired);
        }
        self.user_repo.list_all().await
    }
}
