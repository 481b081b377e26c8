//! Credential check and session creation.

use std::sync::Arc;

use platform::client::ClientFingerprint;

use crate::application::{config::AuthConfig, session_token};
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthRepository, AuthSessionRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

pub struct SignInOutput {
    /// Value for the session cookie.
    pub session_token: String,
    pub user: User,
}

pub struct SignInUseCase<U, A, S>
where
    U: UserRepository,
    A: AuthRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    auth_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, A, S> SignInUseCase<U, A, S>
where
    U: UserRepository,
    A: AuthRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        auth_repo: Arc<A>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            auth_repo,
            session_repo,
            config,
        }
    }

    /// Returns the user when the password matches, `None` otherwise.
    ///
    /// An unknown user name and a wrong password are indistinguishable,
    /// including in timing: a throwaway hash is computed for unknown users.
    pub async fn validate_credentials(
        &self,
        user_name: &str,
        password: String,
    ) -> AuthResult<Option<User>> {
        let raw_password = RawPassword::for_login(password);

        let user = match UserName::new(user_name) {
            Ok(name) => self.user_repo.find_by_user_name(&name).await?,
            Err(_) => None,
        };
        let Some(user) = user else {
            raw_password
                .inner()
                .burn_verification_time(self.config.pepper());
            return Ok(None);
        };

        let auth = self
            .auth_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credential row missing".to_string()))?;

        if auth.password_hash.verify(&raw_password, self.config.pepper()) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        let user = self
            .validate_credentials(&input.user_name, input.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let session = AuthSession::new(
            user.user_id,
            fingerprint.hash_vec(),
            fingerprint.user_agent.clone(),
            self.config.session_ttl_chrono(),
        );
        self.session_repo.create(&session).await?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token: session_token::issue(&self.config, &session.session_id),
            user,
        })
    }
}
