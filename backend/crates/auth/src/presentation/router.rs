//! Auth router, mounted under `/api/auth`.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthRepository, AuthSessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth_session};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: Arc<PgAuthRepository>, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + AuthRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let session = AuthMiddlewareState::new(repo.clone(), config.clone());
    let state = AuthAppState { repo, config };

    let protected = Router::new()
        .route("/create", post(handlers::create_user::<R>))
        .route("/getall", get(handlers::list_users::<R>))
        .route("/me", get(handlers::me::<R>))
        .route("/editprofile", put(handlers::edit_profile::<R>))
        .route(
            "/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route("/{id}/role", put(handlers::update_role::<R>))
        .route_layer(middleware::from_fn_with_state(
            session,
            require_auth_session::<R>,
        ));

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/register", post(handlers::register::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{PASSWORD, register_admin};
    use crate::infra::memory::InMemoryAuthRepository;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> (Router, Arc<InMemoryAuthRepository>, Arc<AuthConfig>) {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::development());
        (
            auth_router_generic(repo.clone(), config.clone()),
            repo,
            config,
        )
    }

    fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, cookie, body)
    }

    async fn register(app: &Router, name: &str) -> Value {
        let (status, _, body) = send(
            app,
            request(
                Method::POST,
                "/register",
                None,
                Some(json!({
                    "userName": name,
                    "password": PASSWORD,
                    "confirmPassword": PASSWORD,
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    async fn login(app: &Router, name: &str) -> String {
        let (status, cookie, _) = send(
            app,
            request(
                Method::POST,
                "/login",
                None,
                Some(json!({ "userName": name, "password": PASSWORD })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        cookie.unwrap()
    }

    #[tokio::test]
    async fn register_login_and_me() {
        let (app, _, _) = app();
        let body = register(&app, "alice").await;
        assert_eq!(body["message"], "Registration successful!");
        assert_eq!(body["user"]["role"], "User");

        let cookie = login(&app, "alice").await;
        assert!(cookie.starts_with("blog_session="));

        let (status, _, me) = send(&app, request(Method::GET, "/me", Some(&cookie), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["userName"], "alice");
        assert_eq!(me["displayName"], "alice");
        assert_eq!(me["roles"], json!(["User"]));
    }

    #[tokio::test]
    async fn error_statuses_follow_the_taxonomy() {
        let (app, _, _) = app();
        register(&app, "alice").await;

        let (status, _, _) = send(
            &app,
            request(
                Method::POST,
                "/register",
                None,
                Some(json!({
                    "userName": "ALICE",
                    "password": PASSWORD,
                    "confirmPassword": PASSWORD,
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) = send(
            &app,
            request(
                Method::POST,
                "/login",
                None,
                Some(json!({ "userName": "alice", "password": "WrongHorse9!" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _, _) = send(&app, request(Method::GET, "/me", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let cookie = login(&app, "alice").await;
        let (status, _, _) = send(&app, request(Method::GET, "/getall", Some(&cookie), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let missing = format!("/{}", uuid::Uuid::new_v4());
        let (status, _, _) = send(&app, request(Method::GET, &missing, Some(&cookie), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_manages_users_and_roles() {
        let (app, repo, config) = app();
        register_admin(&repo, &config, "root").await;
        let bob = register(&app, "bob").await;
        let bob_id = bob["user"]["id"].as_str().unwrap().to_string();
        let admin = login(&app, "root").await;

        let (status, _, users) =
            send(&app, request(Method::GET, "/getall", Some(&admin), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(users.as_array().unwrap().len(), 2);

        let (status, _, user) = send(
            &app,
            request(
                Method::PUT,
                &format!("/{bob_id}/role"),
                Some(&admin),
                Some(json!({ "role": "admin" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["role"], "Admin");

        let (status, _, _) = send(
            &app,
            request(
                Method::PUT,
                &format!("/{bob_id}/role"),
                Some(&admin),
                Some(json!({ "role": "owner" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, body) = send(
            &app,
            request(Method::DELETE, &format!("/{bob_id}"), Some(&admin), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User deleted successfully!");

        let (status, _, _) = send(
            &app,
            request(Method::GET, &format!("/{bob_id}"), Some(&admin), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_profile_checks_password_confirmation() {
        let (app, _, _) = app();
        register(&app, "alice").await;
        let cookie = login(&app, "alice").await;

        let (status, _, _) = send(
            &app,
            request(
                Method::PUT,
                "/editprofile",
                Some(&cookie),
                Some(json!({ "password": "BatteryStaple7?", "confirmPassword": "nope" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, body) = send(
            &app,
            request(
                Method::PUT,
                "/editprofile",
                Some(&cookie),
                Some(json!({ "displayName": "Alice L." })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Profile updated successfully.");
        assert_eq!(body["user"]["displayName"], "Alice L.");
    }

    #[tokio::test]
    async fn logout_revokes_the_session() {
        let (app, repo, _) = app();
        register(&app, "alice").await;
        let cookie = login(&app, "alice").await;
        assert_eq!(repo.session_count(), 1);

        let (status, cleared, _) =
            send(&app, request(Method::POST, "/logout", Some(&cookie), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared.as_deref(), Some("blog_session="));
        assert_eq!(repo.session_count(), 0);

        let (status, _, _) = send(&app, request(Method::GET, "/me", Some(&cookie), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
