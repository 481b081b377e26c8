//! Users, credentials, sessions and roles.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, authorization policy, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, session middleware
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B length rules)
//! - Server-side sessions referenced by an HMAC-signed cookie
//! - Sessions bound to client fingerprint (User-Agent)
//! - Role re-read from the user row on every request

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::check_session::Authenticated;
pub use application::config::AuthConfig;
pub use application::{AdminBootstrap, EnsureAdminOutcome, EnsureAdminUseCase};
pub use domain::policy::{OwnedResource, Requester, can_act_on, can_act_on_user};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AuthMiddlewareState, require_auth_session};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
