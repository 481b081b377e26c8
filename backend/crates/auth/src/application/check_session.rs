//! Resolves a session cookie into the calling [`Requester`].

use std::sync::Arc;

use kernel::id::SessionId;

use crate::application::{config::AuthConfig, session_token};
use crate::domain::policy::Requester;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Authenticated caller together with the session it used.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated {
    pub requester: Requester,
    pub session_id: SessionId,
}

pub struct CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> CheckSessionUseCase<U, S>
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

    /// The role is read from the user row, not from the session.
    pub async fn execute(&self, token: &str, fingerprint_hash: &[u8]) -> AuthResult<Authenticated> {
        let session_id = session_token::parse(&self.config, token)?;

        let mut session = self
            .session_repo
            .find_by_id(&session_id, fingerprint_hash)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(&session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        let Some(user) = self.user_repo.find_by_id(&session.user_id).await? else {
            self.session_repo.delete(&session_id).await?;
            return Err(AuthError::SessionInvalid);
        };

        session.touch();
        if let Err(e) = self.session_repo.update(&session).await {
            tracing::warn!(error = %e, "Failed to update session activity");
        }

        Ok(Authenticated {
            requester: Requester::new(user.user_id, user.role()),
            session_id,
        })
    }
}
