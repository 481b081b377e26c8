//! API server entry point.
//!
//! Startup errors use `anyhow`; request errors are rendered by the
//! `auth` and `blog` crates.

mod config;

use std::sync::Arc;

use anyhow::Context;
use auth::{AuthConfig, AuthMiddlewareState, EnsureAdminOutcome, EnsureAdminUseCase, PgAuthRepository};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use blog::{BlogConfig, PgPostRepository, SeedPostsUseCase};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer, ExposeHeaders};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    let pool = connect_with_retry(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;
    tracing::info!("Migrations completed");

    let auth_repo = Arc::new(PgAuthRepository::new(pool.clone()));
    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));

    // Failure here must not block startup.
    match auth_repo.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Auth session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
        }
    }

    let auth_config = Arc::new(match config.session_secret {
        Some(secret) => AuthConfig {
            cookie_secure: !cfg!(debug_assertions),
            ..AuthConfig::with_secret(secret)
        },
        None => {
            tracing::warn!("SESSION_SECRET not set, using a random secret");
            AuthConfig::development()
        }
    });

    let outcome = EnsureAdminUseCase::new(auth_repo.clone(), auth_config.clone())
        .execute(config.admin.clone())
        .await
        .context("Administrator bootstrap failed")?;
    let admin = match outcome {
        EnsureAdminOutcome::Created(user) => {
            tracing::info!(user_id = %user.user_id, "Administrator account created");
            user
        }
        EnsureAdminOutcome::AlreadyPresent(user) => user,
    };

    if config.seed_sample_posts {
        SeedPostsUseCase::new(post_repo.clone())
            .execute(admin.user_id, admin.display_name.as_str())
            .await
            .context("Seeding sample posts failed")?;
    }

    let blog_config = Arc::new(match config.preview_length {
        Some(length) => BlogConfig::with_preview_length(length),
        None => BlogConfig::default(),
    });

    let allowed_origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .expose_headers(ExposeHeaders::list([header::LOCATION]))
        .allow_credentials(true);

    let session_state = AuthMiddlewareState::new(auth_repo.clone(), auth_config.clone());

    let app = Router::new()
        .nest("/api/auth", auth::auth_router(auth_repo, auth_config))
        .nest(
            "/api/posts",
            blog::blog_router(post_repo, blog_config, session_state),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Tries `db_connect_attempts` times, sleeping between attempts.
async fn connect_with_retry(config: &ApiConfig) -> anyhow::Result<PgPool> {
    let mut attempt = 1;
    loop {
        let result = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await;

        match result {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < config.db_connect_attempts => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts = config.db_connect_attempts,
                    retry_in_secs = config.db_connect_retry_delay.as_secs(),
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(config.db_connect_retry_delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Could not connect to the database after {attempt} attempts")
                });
            }
        }
    }
}
