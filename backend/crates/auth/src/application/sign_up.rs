//! Account creation: self-registration and creation by an administrator.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{auth::Auth, user::User};
use crate::domain::policy::Requester;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Self-registration request.
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
    /// Must equal `password` when present.
    pub confirm_password: Option<String>,
    /// Defaults to the user name.
    pub display_name: Option<String>,
}

/// Account created by an administrator.
pub struct CreateUserInput {
    pub user_name: String,
    pub password: String,
    pub display_name: Option<String>,
    pub is_admin: bool,
}

pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Registers a user with role `User`.
    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        if let Some(confirm) = &input.confirm_password {
            if *confirm != input.password {
                return Err(AuthError::PasswordMismatch);
            }
        }

        let user = self
            .create(
                input.user_name,
                input.password,
                input.display_name,
                UserRole::User,
            )
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );
        Ok(user)
    }

    /// Creates a user with role `Admin` or `User`. Requester must be admin.
    pub async fn create_by_admin(
        &self,
        requester: &Requester,
        input: CreateUserInput,
    ) -> AuthResult<User> {
        if !requester.is_admin() {
            return Err(AuthError::AdminRequired);
        }

        let role = if input.is_admin {
            UserRole::Admin
        } else {
            UserRole::User
        };
        let user = self
            .create(input.user_name, input.password, input.display_name, role)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            created_by = %requester.user_id,
            role = %role,
            "User created by administrator"
        );
        Ok(user)
    }

    pub(crate) async fn create(
        &self,
        user_name: String,
        password: String,
        display_name: Option<String>,
        role: UserRole,
    ) -> AuthResult<User> {
        let user_name = UserName::new(user_name)?;
        let display_name = DisplayName::or_user_name(display_name.as_deref(), &user_name)?;
        let raw_password = RawPassword::new(password)?;

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(user_name, display_name, role);
        let auth = Auth::new(user.user_id, password_hash);

        self.user_repo.create(&user, &auth).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::*;
    use crate::domain::repository::UserRepository;

    #[tokio::test]
    async fn register_assigns_user_role_and_default_display_name() {
        let (repo, config) = setup();
        let use_case = SignUpUseCase::new(repo.clone(), config);

        let user = use_case
            .execute(SignUpInput {
                user_name: "alice".into(),
                password: PASSWORD.into(),
                confirm_password: Some(PASSWORD.into()),
                display_name: None,
            })
            .await
            .unwrap();

        assert_eq!(user.user_role, Some(UserRole::User));
        assert_eq!(user.display_name.as_str(), "alice");
        assert!(repo.find_by_id(&user.user_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_user_name_is_rejected_case_insensitively() {
        let (repo, config) = setup();
        register(&repo, &config, "alice").await;

        let use_case = SignUpUseCase::new(repo.clone(), config);
        let err = use_case
            .execute(SignUpInput {
                user_name: "ALICE".into(),
                password: PASSWORD.into(),
                confirm_password: None,
                display_name: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UserNameTaken));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_input_writes_nothing() {
        let (repo, config) = setup();
        let use_case = SignUpUseCase::new(repo.clone(), config);

        let weak = use_case
            .execute(SignUpInput {
                user_name: "carol".into(),
                password: "short".into(),
                confirm_password: None,
                display_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(weak, AuthError::Validation(_)));

        let mismatch = use_case
            .execute(SignUpInput {
                user_name: "carol".into(),
                password: PASSWORD.into(),
                confirm_password: Some("CorrectHorse8!".into()),
                display_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(mismatch, AuthError::PasswordMismatch));

        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_creates_admin_but_user_cannot() {
        let (repo, config) = setup();
        let admin = register_admin(&repo, &config, "root").await;
        let bob = register(&repo, &config, "bob").await;
        let use_case = SignUpUseCase::new(repo.clone(), config);

        let created = use_case
            .create_by_admin(
                &requester(&admin),
                CreateUserInput {
                    user_name: "editor".into(),
                    password: PASSWORD.into(),
                    display_name: Some("The Editor".into()),
                    is_admin: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.role(), UserRole::Admin);
        assert_eq!(created.display_name.as_str(), "The Editor");

        let err = use_case
            .create_by_admin(
                &requester(&bob),
                CreateUserInput {
                    user_name: "sneaky".into(),
                    password: PASSWORD.into(),
                    display_name: None,
                    is_admin: true,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AdminRequired));
    }
}
