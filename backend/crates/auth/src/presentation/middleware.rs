//! Session middleware and the `Authenticated` extractor.
//!
//! `require_auth_session` resolves the cookie into an [`Authenticated`]
//! caller and stores it in the request extensions; handlers take it as an
//! argument. Requests without a valid session are answered with 401.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::client::extract_fingerprint;
use platform::cookie::extract_cookie;

use crate::application::CheckSessionUseCase;
use crate::application::check_session::Authenticated;
use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthError;

pub struct AuthMiddlewareState<R>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthMiddlewareState<R>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }
}

// Manual impl: `R` itself need not be `Clone`.
impl<R> Clone for AuthMiddlewareState<R>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

pub async fn require_auth_session<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let headers = req.headers();
    let token = extract_cookie(headers, &state.config.session_cookie_name)
        .ok_or(AuthError::SessionInvalid)?;
    let fingerprint = extract_fingerprint(headers);

    let authenticated = CheckSessionUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    )
    .execute(&token, &fingerprint.hash)
    .await?;

    req.extensions_mut().insert(authenticated);
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Authenticated>()
            .copied()
            .ok_or(AuthError::SessionInvalid)
    }
}
