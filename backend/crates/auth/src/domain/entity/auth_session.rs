//! Server-side login session.
//!
//! The cookie only carries the signed session id. The role is not cached
//! here; it is re-read from the user on every request so role changes take
//! effect immediately.

use chrono::{DateTime, Duration, Utc};
use kernel::id::SessionId;

use crate::domain::value_object::user_id::UserId;

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub user_id: UserId,
    /// Unix time in milliseconds.
    pub expires_at_ms: i64,
    /// SHA-256 of the User-Agent that created the session.
    pub client_fingerprint_hash: Vec<u8>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(
        user_id: UserId,
        fingerprint_hash: Vec<u8>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id: SessionId::new(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            client_fingerprint_hash: fingerprint_hash,
            user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }

    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_live() {
        let session = AuthSession::new(UserId::new(), vec![1; 32], None, Duration::hours(1));
        assert!(!session.is_expired());
        assert_eq!(session.created_at, session.last_activity_at);
    }

    #[test]
    fn zero_ttl_session_is_expired() {
        let session = AuthSession::new(UserId::new(), vec![], None, Duration::zero());
        assert!(session.is_expired());
    }
}
