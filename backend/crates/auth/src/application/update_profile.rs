//! Profile update: user name, display name and password.

use std::sync::Arc;

use kernel::id::SessionId;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::policy::{Requester, can_act_on_user};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName,
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Fields left `None` (or blank) are not changed.
#[derive(Default)]
pub struct UpdateProfileInput {
    pub user_name: Option<String>,
    pub display_name: Option<String>,
    pub password: Option<String>,
    /// Must equal `password` when a new password is given.
    pub confirm_password: Option<String>,
}

pub struct UpdateProfileUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl<U, S> UpdateProfileUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Validates everything, then writes the profile and the new password in
    /// one step. On a password change every other session of the target is
    /// revoked; `current_session` survives.
    pub async fn execute(
        &self,
        requester: &Requester,
        target: &UserId,
        input: UpdateProfileInput,
        current_session: Option<SessionId>,
    ) -> AuthResult<User> {
        if !can_act_on_user(requester, target) {
            return Err(AuthError::Forbidden);
        }

        let mut user = self
            .user_repo
            .find_by_id(target)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let new_user_name = non_blank(input.user_name)
            .map(UserName::new)
            .transpose()?;
        let new_display_name = non_blank(input.display_name)
            .map(DisplayName::new)
            .transpose()?;
        let new_password = match non_blank(input.password) {
            Some(password) => {
                if let Some(confirm) = &input.confirm_password {
                    if *confirm != password {
                        return Err(AuthError::PasswordMismatch);
                    }
                }
                Some(RawPassword::new(password)?)
            }
            None => None,
        };

        if let Some(name) = &new_user_name {
            if let Some(holder) = self.user_repo.find_by_user_name(name).await? {
                if holder.user_id != user.user_id {
                    return Err(AuthError::UserNameTaken);
                }
            }
        }

        let password_hash = new_password
            .as_ref()
            .map(|raw| UserPassword::from_raw(raw, self.config.pepper()))
            .transpose()?;

        if let Some(name) = new_user_name {
            user.set_user_name(name);
        }
        if let Some(display_name) = new_display_name {
            user.set_display_name(display_name);
        }
        self.user_repo
            .update_profile(&user, password_hash.as_ref())
            .await?;

        if password_hash.is_some() {
            let keep = current_session.filter(|_| requester.user_id == *target);
            let revoked = self.session_repo.delete_all_for_user(target, keep).await?;
            tracing::info!(user_id = %target, revoked, "Password changed");
        }

        tracing::info!(
            user_id = %user.user_id,
            actor = %requester.user_id,
            "Profile updated"
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_in::SignInUseCase;
    use crate::application::test_support::*;

    fn use_case(
        repo: &Arc<crate::infra::memory::InMemoryAuthRepository>,
        config: &Arc<AuthConfig>,
    ) -> UpdateProfileUseCase<
        crate::infra::memory::InMemoryAuthRepository,
        crate::infra::memory::InMemoryAuthRepository,
    > {
        UpdateProfileUseCase::new(repo.clone(), repo.clone(), config.clone())
    }

    #[tokio::test]
    async fn user_updates_own_display_name() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice").await;

        let updated = use_case(&repo, &config)
            .execute(
                &requester(&alice),
                &alice.user_id,
                UpdateProfileInput {
                    display_name: Some("Alice Liddell".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.display_name.as_str(), "Alice Liddell");
        assert_eq!(updated.user_name.original(), "alice");
    }

    #[tokio::test]
    async fn stranger_is_forbidden_and_admin_is_not() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice").await;
        let bob = register(&repo, &config, "bob").await;
        let admin = register_admin(&repo, &config, "root").await;
        let update = use_case(&repo, &config);

        let err = update
            .execute(
                &requester(&bob),
                &alice.user_id,
                UpdateProfileInput {
                    display_name: Some("pwned".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Forbidden));

        let updated = update
            .execute(
                &requester(&admin),
                &alice.user_id,
                UpdateProfileInput {
                    user_name: Some("alice2".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.user_name.canonical(), "alice2");
    }

    #[tokio::test]
    async fn taken_user_name_is_rejected_but_own_name_is_fine() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice").await;
        register(&repo, &config, "bob").await;
        let update = use_case(&repo, &config);

        let err = update
            .execute(
                &requester(&alice),
                &alice.user_id,
                UpdateProfileInput {
                    user_name: Some("Bob".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));

        let same = update
            .execute(
                &requester(&alice),
                &alice.user_id,
                UpdateProfileInput {
                    user_name: Some("ALICE".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(same.user_name.original(), "ALICE");
    }

    #[tokio::test]
    async fn missing_target_is_not_found_for_admin() {
        let (repo, config) = setup();
        let admin = register_admin(&repo, &config, "root").await;

        let err = use_case(&repo, &config)
            .execute(
                &requester(&admin),
                &UserId::new(),
                UpdateProfileInput::default(),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn password_change_rehashes_and_revokes_other_sessions() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice").await;
        let current = sign_in(&repo, &config, &alice).await;
        sign_in(&repo, &config, &alice).await;
        assert_eq!(repo.session_count(), 2);

        let current_id = crate::application::session_token::parse(&config, &current).unwrap();
        use_case(&repo, &config)
            .execute(
                &requester(&alice),
                &alice.user_id,
                UpdateProfileInput {
                    password: Some("BatteryStaple7?".into()),
                    confirm_password: Some("BatteryStaple7?".into()),
                    ..Default::default()
                },
                Some(current_id),
            )
            .await
            .unwrap();

        assert_eq!(repo.session_count(), 1);
        assert!(repo.has_session(&current_id));

        let sign_in = SignInUseCase::new(repo.clone(), repo.clone(), repo.clone(), config);
        assert!(
            sign_in
                .validate_credentials("alice", PASSWORD.into())
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            sign_in
                .validate_credentials("alice", "BatteryStaple7?".into())
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn invalid_fields_leave_profile_untouched() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice").await;

        let err = use_case(&repo, &config)
            .execute(
                &requester(&alice),
                &alice.user_id,
                UpdateProfileInput {
                    display_name: Some("New Name".into()),
                    password: Some("short".into()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let stored = UserRepository::find_by_id(repo.as_ref(), &alice.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.display_name.as_str(), "alice");
    }

    #[tokio::test]
    async fn failed_password_write_keeps_old_profile() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice").await;
        repo.remove_credential(&alice.user_id);

        let err = use_case(&repo, &config)
            .execute(
                &requester(&alice),
                &alice.user_id,
                UpdateProfileInput {
                    user_name: Some("alice_renamed".into()),
                    display_name: Some("Renamed".into()),
                    password: Some("BatteryStaple7?".into()),
                    confirm_password: Some("BatteryStaple7?".into()),
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));

        let stored = UserRepository::find_by_id(repo.as_ref(), &alice.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.user_name.original(), "alice");
        assert_eq!(stored.display_name.as_str(), "alice");
    }
}
