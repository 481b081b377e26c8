//! Blog router, mounted under `/api/posts`.
//!
//! Reads are public. Writes go through the auth session middleware.

use std::sync::Arc;

use auth::domain::repository::{AuthSessionRepository, UserRepository};
use auth::{AuthMiddlewareState, PgAuthRepository, require_auth_session};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::application::config::BlogConfig;
use crate::domain::repository::PostRepository;
use crate::infra::postgres::PgPostRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the Blog router with PostgreSQL repositories
pub fn blog_router(
    repo: Arc<PgPostRepository>,
    config: Arc<BlogConfig>,
    session: AuthMiddlewareState<PgAuthRepository>,
) -> Router {
    blog_router_generic(repo, config, session)
}

/// Create a generic Blog router for any repository implementation
pub fn blog_router_generic<P, R>(
    repo: Arc<P>,
    config: Arc<BlogConfig>,
    session: AuthMiddlewareState<R>,
) -> Router
where
    P: PostRepository + Send + Sync + 'static,
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let require_session = middleware::from_fn_with_state(session, require_auth_session::<R>);

    Router::new()
        .route(
            "/",
            get(handlers::list_posts::<P>)
                .merge(post(handlers::create_post::<P>).route_layer(require_session.clone())),
        )
        .route(
            "/{id}",
            get(handlers::get_post::<P>).merge(
                put(handlers::update_post::<P>)
                    .delete(handlers::delete_post::<P>)
                    .route_layer(require_session),
            ),
        )
        .with_state(BlogAppState { repo, config })
}
