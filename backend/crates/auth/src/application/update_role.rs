//! Role assignment and lookup.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::policy::Requester;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct UpdateRoleUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateRoleUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Replaces the target's role. Blank means `User`.
    pub async fn execute(
        &self,
        requester: &Requester,
        target: &UserId,
        role: Option<&str>,
    ) -> AuthResult<User> {
        if !requester.is_admin() {
            return Err(AuthError::AdminRequired);
        }
        let role = UserRole::parse(role)?;

        let mut user = self
            .user_repo
            .find_by_id(target)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let previous = user.role();
        user.set_role(role);
        self.user_repo.update(&user).await?;

        tracing::info!(
            user_id = %target,
            from = %previous,
            to = %role,
            actor = %requester.user_id,
            "User role replaced"
        );
        Ok(user)
    }

    /// Effective role, `User` when none is assigned.
    pub async fn get_role(&self, user_id: &UserId) -> AuthResult<UserRole> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .map(|user| user.role())
            .ok_or(AuthError::UserNotFound)
    }
}
