//! Repository traits.
//!
//! Implemented by `infra::postgres::PgAuthRepository` and, for tests,
//! `infra::memory::InMemoryAuthRepository`.

use kernel::id::SessionId;

use crate::domain::entity::{auth::Auth, auth_session::AuthSession, user::User};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Inserts the user and its credential atomically.
    ///
    /// Fails with `UserNameTaken` when the canonical name is already used;
    /// nothing is written in that case.
    async fn create(&self, user: &User, auth: &Auth) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Case-insensitive lookup.
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// All users ordered by user name.
    async fn list_all(&self) -> AuthResult<Vec<User>>;

    /// Writes name, display name, email and role. `UserNotFound` when the
    /// row is gone, `UserNameTaken` on a uniqueness race.
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Like [`update`](Self::update), plus the password hash when one is
    /// given. Both rows are written or neither is.
    async fn update_profile(
        &self,
        user: &User,
        password_hash: Option<&UserPassword>,
    ) -> AuthResult<()>;

    /// Removes the user, credential and sessions. Returns `false` when no
    /// such user exists and `UserHasPosts` while posts still reference it.
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}

#[trait_variant::make(AuthRepository: Send)]
pub trait LocalAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Auth>>;

    async fn update(&self, auth: &Auth) -> AuthResult<()>;
}

#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Live session by id. `SessionFingerprintMismatch` when it was created
    /// by a different client.
    async fn find_by_id(
        &self,
        session_id: &SessionId,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>>;

    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Deletes every session of the user except `except`.
    async fn delete_all_for_user(
        &self,
        user_id: &UserId,
        except: Option<SessionId>,
    ) -> AuthResult<u64>;

    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
