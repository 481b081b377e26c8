//! Auth configuration.

use std::time::Duration;

use platform::cookie::CookieConfig;
pub use platform::cookie::SameSite;
use platform::crypto::{SECRET_LEN, random_secret};

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_cookie_name: String,
    /// HMAC key for session tokens.
    pub session_secret: [u8; SECRET_LEN],
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Application-wide secret appended to passwords before hashing.
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "blog_session".to_string(),
            session_secret: [0u8; SECRET_LEN],
            session_ttl: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    pub fn with_secret(session_secret: [u8; SECRET_LEN]) -> Self {
        Self {
            session_secret,
            ..Default::default()
        }
    }

    /// Random secret and a cookie usable over plain http.
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_secret(random_secret())
        }
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::days(7))
    }

    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: i64::try_from(self.session_ttl.as_secs()).ok(),
        }
    }
}
