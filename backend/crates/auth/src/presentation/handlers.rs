//! HTTP handlers for `/api/auth`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use platform::client::extract_fingerprint;
use platform::cookie::extract_cookie;

use crate::application::check_session::Authenticated;
use crate::application::config::AuthConfig;
use crate::application::{
    CreateUserInput, DeleteUserUseCase, QueryUsersUseCase, SignInInput, SignInUseCase,
    SignOutUseCase, SignUpInput, SignUpUseCase, UpdateProfileInput, UpdateProfileUseCase,
    UpdateRoleUseCase,
};
use crate::domain::repository::{AuthRepository, AuthSessionRepository, UserRepository};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreateUserRequest, EditProfileRequest, LoginRequest, MeResponse, MessageResponse,
    RegisterRequest, RoleRequest, UpdateUserRequest, UserResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let fingerprint = extract_fingerprint(&headers);

    let output = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    )
    .execute(
        SignInInput {
            user_name: req.user_name,
            password: req.password,
        },
        fingerprint,
    )
    .await?;

    let cookie = state
        .config
        .cookie()
        .set_cookie_header(&output.session_token)
        .ok_or_else(|| AuthError::Internal("Session cookie is not a valid header".into()))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Login successful!").with_user(&output.user)),
    )
        .into_response())
}

/// POST /api/auth/logout
///
/// Always succeeds and clears the cookie, even without a live session.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        if let Err(e) = use_case.execute(&token).await {
            tracing::debug!(error = %e, "Logout without a valid session");
        }
    }

    with_cleared_cookie(
        &state.config,
        Json(MessageResponse::new("Logout successful!")).into_response(),
    )
}

// ============================================================================
// Registration and account creation
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user = SignUpUseCase::new(state.repo.clone(), state.config.clone())
        .execute(SignUpInput {
            user_name: req.user_name,
            password: req.password,
            confirm_password: Some(req.confirm_password),
            display_name: req.display_name,
        })
        .await?;

    Ok(Json(
        MessageResponse::new("Registration successful!").with_user(&user),
    ))
}

/// POST /api/auth/create (admin)
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    auth: Authenticated,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user = SignUpUseCase::new(state.repo.clone(), state.config.clone())
        .create_by_admin(
            &auth.requester,
            CreateUserInput {
                user_name: req.user_name,
                password: req.password,
                display_name: req.display_name,
                is_admin: req.is_admin,
            },
        )
        .await?;

    let message = format!("User created successfully with role {}", user.role());
    Ok(Json(MessageResponse::new(message).with_user(&user)))
}

// ============================================================================
// Queries
// ============================================================================

/// GET /api/auth/getall (admin)
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    auth: Authenticated,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let users = QueryUsersUseCase::new(state.repo.clone())
        .list_all(&auth.requester)
        .await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    auth: Authenticated,
) -> AuthResult<Json<MeResponse>>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user = QueryUsersUseCase::new(state.repo.clone())
        .me(&auth.requester)
        .await?;
    Ok(Json(MeResponse::from(&user)))
}

/// GET /api/auth/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = QueryUsersUseCase::new(state.repo.clone())
        .get(&auth.requester, &user_id)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

// ============================================================================
// Updates
// ============================================================================

/// PUT /api/auth/{id}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = update_profile_use_case(&state)
        .execute(
            &auth.requester,
            &user_id,
            UpdateProfileInput {
                user_name: req.user_name,
                display_name: req.display_name,
                ..Default::default()
            },
            Some(auth.session_id),
        )
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/auth/editprofile
pub async fn edit_profile<R>(
    State(state): State<AuthAppState<R>>,
    auth: Authenticated,
    Json(req): Json<EditProfileRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user = update_profile_use_case(&state)
        .execute(
            &auth.requester,
            &auth.requester.user_id,
            UpdateProfileInput {
                user_name: req.user_name,
                display_name: req.display_name,
                password: req.password,
                confirm_password: req.confirm_password,
            },
            Some(auth.session_id),
        )
        .await?;

    Ok(Json(
        MessageResponse::new("Profile updated successfully.").with_user(&user),
    ))
}

/// PUT /api/auth/{id}/role (admin)
pub async fn update_role<R>(
    State(state): State<AuthAppState<R>>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(req): Json<RoleRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = UpdateRoleUseCase::new(state.repo.clone())
        .execute(&auth.requester, &user_id, req.role.as_deref())
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/auth/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    DeleteUserUseCase::new(state.repo.clone())
        .execute(&auth.requester, &user_id)
        .await?;

    let response = Json(MessageResponse::new("User deleted successfully!")).into_response();
    if user_id == auth.requester.user_id {
        return Ok(with_cleared_cookie(&state.config, response));
    }
    Ok(response)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// A malformed id cannot name an existing user.
fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    UserId::parse_str(raw).map_err(|_| AuthError::UserNotFound)
}

fn update_profile_use_case<R>(state: &AuthAppState<R>) -> UpdateProfileUseCase<R, R>
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    UpdateProfileUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
}

fn with_cleared_cookie(config: &AuthConfig, mut response: Response) -> Response {
    let cookie: Option<HeaderValue> = config.cookie().delete_cookie_header();
    if let Some(cookie) = cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}
