//! In-process repository used by tests and by crates that exercise the
//! auth middleware without a database.
//!
//! Mirrors the constraints the PostgreSQL schema enforces: unique canonical
//! user names and the posts foreign key on user deletion.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use kernel::id::SessionId;

use crate::domain::entity::{auth::Auth, auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthRepository, AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    credentials: HashMap<UserId, Auth>,
    sessions: HashMap<SessionId, AuthSession>,
    /// Users referenced by at least one post.
    authors: HashSet<UserId>,
}

#[derive(Default)]
pub struct InMemoryAuthRepository {
    state: Mutex<State>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulates a post referencing the user, which blocks deletion.
    pub fn mark_has_posts(&self, user_id: &UserId) {
        self.lock().authors.insert(*user_id);
    }

    /// Stores the user with no role, as rows created before roles existed.
    pub fn clear_role(&self, user_id: &UserId) {
        if let Some(user) = self.lock().users.get_mut(user_id) {
            user.user_role = None;
        }
    }

    /// Drops the credential row so password writes fail.
    pub fn remove_credential(&self, user_id: &UserId) {
        self.lock().credentials.remove(user_id);
    }

    pub fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn has_session(&self, session_id: &SessionId) -> bool {
        self.lock().sessions.contains_key(session_id)
    }

    pub fn display_name_of(&self, user_id: &UserId) -> Option<String> {
        self.lock()
            .users
            .get(user_id)
            .map(|u| u.display_name.as_str().to_string())
    }

    fn name_taken(state: &State, name: &UserName, except: Option<&UserId>) -> bool {
        state
            .users
            .values()
            .any(|u| u.user_name.same_as(name) && Some(&u.user_id) != except)
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User, auth: &Auth) -> AuthResult<()> {
        let mut state = self.lock();
        if Self::name_taken(&state, &user.user_name, None) {
            return Err(AuthError::UserNameTaken);
        }
        state.users.insert(user.user_id, user.clone());
        state.credentials.insert(auth.user_id, auth.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.lock().users.get(user_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.user_name.same_as(user_name))
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.email.as_ref() == Some(email))
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(Self::name_taken(&self.lock(), user_name, None))
    }

    async fn list_all(&self) -> AuthResult<Vec<User>> {
        let mut users: Vec<User> = self.lock().users.values().cloned().collect();
        users.sort_by(|a, b| a.user_name.canonical().cmp(b.user_name.canonical()));
        Ok(users)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut state = self.lock();
        if !state.users.contains_key(&user.user_id) {
            return Err(AuthError::UserNotFound);
        }
        if Self::name_taken(&state, &user.user_name, Some(&user.user_id)) {
            return Err(AuthError::UserNameTaken);
        }
        state.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        user: &User,
        password_hash: Option<&UserPassword>,
    ) -> AuthResult<()> {
        let mut state = self.lock();
        if !state.users.contains_key(&user.user_id) {
            return Err(AuthError::UserNotFound);
        }
        if Self::name_taken(&state, &user.user_name, Some(&user.user_id)) {
            return Err(AuthError::UserNameTaken);
        }
        if let Some(hash) = password_hash {
            let auth = state
                .credentials
                .get_mut(&user.user_id)
                .ok_or_else(|| AuthError::Internal("Credential row missing".to_string()))?;
            auth.replace_password(hash.clone());
        }
        state.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        let mut state = self.lock();
        if !state.users.contains_key(user_id) {
            return Ok(false);
        }
        if state.authors.contains(user_id) {
            return Err(AuthError::UserHasPosts);
        }
        state.users.remove(user_id);
        state.credentials.remove(user_id);
        state.sessions.retain(|_, s| s.user_id != *user_id);
        Ok(true)
    }
}

impl AuthRepository for InMemoryAuthRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Auth>> {
        Ok(self.lock().credentials.get(user_id).cloned())
    }

    async fn update(&self, auth: &Auth) -> AuthResult<()> {
        self.lock().credentials.insert(auth.user_id, auth.clone());
        Ok(())
    }
}

impl AuthSessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.lock()
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        session_id: &SessionId,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>> {
        let state = self.lock();
        let Some(session) = state.sessions.get(session_id) else {
            return Ok(None);
        };
        if session.client_fingerprint_hash != fingerprint_hash {
            return Err(AuthError::SessionFingerprintMismatch);
        }
        Ok(Some(session.clone()))
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        if let Some(stored) = self.lock().sessions.get_mut(&session.session_id) {
            stored.expires_at_ms = session.expires_at_ms;
            stored.last_activity_at = session.last_activity_at;
        }
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        self.lock().sessions.remove(session_id);
        Ok(())
    }

    async fn delete_all_for_user(
        &self,
        user_id: &UserId,
        except: Option<SessionId>,
    ) -> AuthResult<u64> {
        let mut state = self.lock();
        let before = state.sessions.len();
        state
            .sessions
            .retain(|id, s| s.user_id != *user_id || Some(*id) == except);
        Ok((before - state.sessions.len()) as u64)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut state = self.lock();
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at_ms > now_ms);
        Ok((before - state.sessions.len()) as u64)
    }
}
