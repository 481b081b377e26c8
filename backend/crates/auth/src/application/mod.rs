//! Application layer: one use case per file.

pub mod check_session;
pub mod config;
pub mod delete_user;
pub mod ensure_admin;
pub mod query_users;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod update_profile;
pub mod update_role;

pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use delete_user::DeleteUserUseCase;
pub use ensure_admin::{AdminBootstrap, EnsureAdminOutcome, EnsureAdminUseCase};
pub use query_users::QueryUsersUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{CreateUserInput, SignUpInput, SignUpUseCase};
pub use update_profile::{UpdateProfileInput, UpdateProfileUseCase};
pub use update_role::UpdateRoleUseCase;

#[cfg(test)]
pub(crate) mod test_support;
