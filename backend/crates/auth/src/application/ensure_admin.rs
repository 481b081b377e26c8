//! Administrator bootstrap, run once at startup before serving.

use std::sync::Arc;

use crate::application::{config::AuthConfig, sign_up::SignUpUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Configured administrator account. All fields are required.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum EnsureAdminOutcome {
    Created(User),
    AlreadyPresent(User),
}

impl EnsureAdminOutcome {
    pub fn user(&self) -> &User {
        match self {
            EnsureAdminOutcome::Created(user) | EnsureAdminOutcome::AlreadyPresent(user) => user,
        }
    }
}

pub struct EnsureAdminUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> EnsureAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Looks the administrator up by email and creates it when absent.
    /// Running it again changes nothing.
    pub async fn execute(&self, settings: AdminBootstrap) -> AuthResult<EnsureAdminOutcome> {
        if [&settings.user_name, &settings.email, &settings.password]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(AuthError::Validation(
                "Admin user settings are incomplete".to_string(),
            ));
        }
        let email = Email::new(&settings.email)?;

        if let Some(existing) = self.user_repo.find_by_email(&email).await? {
            tracing::info!(user_id = %existing.user_id, "Administrator already present");
            return Ok(EnsureAdminOutcome::AlreadyPresent(existing));
        }

        let sign_up = SignUpUseCase::new(self.user_repo.clone(), self.config.clone());
        let mut admin = sign_up
            .create(settings.user_name, settings.password, None, UserRole::Admin)
            .await?;

        admin = admin.with_email(email);
        self.user_repo.update(&admin).await?;

        tracing::info!(user_id = %admin.user_id, "Administrator created");
        Ok(EnsureAdminOutcome::Created(admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::*;

    fn settings() -> AdminBootstrap {
        AdminBootstrap {
            user_name: "admin".into(),
            email: "admin@blog.local".into(),
            password: PASSWORD.into(),
        }
    }

    #[tokio::test]
    async fn creates_admin_once() {
        let (repo, config) = setup();
        let ensure = EnsureAdminUseCase::new(repo.clone(), config);

        let first = ensure.execute(settings()).await.unwrap();
        assert!(matches!(first, EnsureAdminOutcome::Created(_)));
        assert!(first.user().is_admin());
        assert_eq!(first.user().display_name.as_str(), "admin");

        let second = ensure.execute(settings()).await.unwrap();
        assert!(matches!(second, EnsureAdminOutcome::AlreadyPresent(_)));
        assert_eq!(second.user().user_id, first.user().user_id);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn incomplete_settings_are_rejected() {
        let (repo, config) = setup();
        let err = EnsureAdminUseCase::new(repo, config)
            .execute(AdminBootstrap {
                password: " ".into(),
                ..settings()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }
}
