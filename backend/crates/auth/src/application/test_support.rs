//! Shared fixtures for use case tests.

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, header};
use platform::client::{ClientFingerprint, extract_fingerprint};

use crate::application::{
    config::AuthConfig,
    sign_in::{SignInInput, SignInUseCase},
    sign_up::SignUpUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::policy::Requester;
use crate::domain::value_object::user_role::UserRole;
use crate::infra::memory::InMemoryAuthRepository;

pub const PASSWORD: &str = "CorrectHorse9!";
pub const USER_AGENT: &str = "blog-tests/1.0";

pub fn setup() -> (Arc<InMemoryAuthRepository>, Arc<AuthConfig>) {
    (
        Arc::new(InMemoryAuthRepository::new()),
        Arc::new(AuthConfig::development()),
    )
}

async fn create(
    repo: &Arc<InMemoryAuthRepository>,
    config: &Arc<AuthConfig>,
    name: &str,
    role: UserRole,
) -> User {
    SignUpUseCase::new(repo.clone(), config.clone())
        .create(name.to_string(), PASSWORD.to_string(), None, role)
        .await
        .expect("fixture user")
}

pub async fn register(
    repo: &Arc<InMemoryAuthRepository>,
    config: &Arc<AuthConfig>,
    name: &str,
) -> User {
    create(repo, config, name, UserRole::User).await
}

pub async fn register_admin(
    repo: &Arc<InMemoryAuthRepository>,
    config: &Arc<AuthConfig>,
    name: &str,
) -> User {
    create(repo, config, name, UserRole::Admin).await
}

pub fn requester(user: &User) -> Requester {
    Requester::new(user.user_id, user.role())
}

pub fn fingerprint() -> ClientFingerprint {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    extract_fingerprint(&headers)
}

/// Signs the user in with [`PASSWORD`] and returns the cookie token.
pub async fn sign_in(
    repo: &Arc<InMemoryAuthRepository>,
    config: &Arc<AuthConfig>,
    user: &User,
) -> String {
    SignInUseCase::new(repo.clone(), repo.clone(), repo.clone(), config.clone())
        .execute(
            SignInInput {
                user_name: user.user_name.original().to_string(),
                password: PASSWORD.to_string(),
            },
            fingerprint(),
        )
        .await
        .expect("fixture sign in")
        .session_token
}
