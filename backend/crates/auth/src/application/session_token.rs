//! Session cookie token: `<session uuid>.<signature>`.

use kernel::id::SessionId;
use platform::crypto::{sign_token, verify_token};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

pub fn issue(config: &AuthConfig, session_id: &SessionId) -> String {
    sign_token(&config.session_secret, &session_id.to_string())
}

/// Verifies the signature and extracts the session id.
pub fn parse(config: &AuthConfig, token: &str) -> AuthResult<SessionId> {
    let payload = verify_token(&config.session_secret, token).ok_or(AuthError::SessionInvalid)?;
    SessionId::parse_str(payload).map_err(|_| AuthError::SessionInvalid)
}
