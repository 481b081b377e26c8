//! Process configuration read from the environment (and `.env`).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AdminBootstrap;
use base64::Engine;
use base64::engine::general_purpose;
use platform::crypto::SECRET_LEN;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_DB_CONNECT_ATTEMPTS: u32 = 2;
const DEFAULT_DB_CONNECT_RETRY_DELAY_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub admin: AdminBootstrap,
    /// `None` only in debug builds, where a random secret is generated.
    pub session_secret: Option<[u8; SECRET_LEN]>,
    pub preview_length: Option<usize>,
    pub seed_sample_posts: bool,
    pub db_connect_attempts: u32,
    pub db_connect_retry_delay: Duration,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `lookup` returns the raw value of a variable. `allow_random_secret`
    /// makes `SESSION_SECRET` optional.
    pub fn from_lookup<F>(lookup: F, allow_random_secret: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let admin = AdminBootstrap {
            user_name: get("ADMIN_USER_NAME").unwrap_or_default(),
            email: get("ADMIN_EMAIL").unwrap_or_default(),
            password: get("ADMIN_PASSWORD").unwrap_or_default(),
        };

        let session_secret = match get("SESSION_SECRET") {
            Some(encoded) => Some(decode_secret(&encoded)?),
            None if allow_random_secret => None,
            None => bail!("SESSION_SECRET must be set in production"),
        };

        let preview_length = get("POST_PREVIEW_LENGTH")
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("POST_PREVIEW_LENGTH must be a non-negative integer")?;

        let seed_sample_posts = get("SEED_SAMPLE_POSTS")
            .map(|v| parse_bool(&v))
            .transpose()?
            .unwrap_or(false);

        let db_connect_attempts = get("DB_CONNECT_ATTEMPTS")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("DB_CONNECT_ATTEMPTS must be a positive integer")?
            .unwrap_or(DEFAULT_DB_CONNECT_ATTEMPTS)
            .max(1);

        let db_connect_retry_delay = Duration::from_secs(
            get("DB_CONNECT_RETRY_DELAY_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("DB_CONNECT_RETRY_DELAY_SECS must be an integer")?
                .unwrap_or(DEFAULT_DB_CONNECT_RETRY_DELAY_SECS),
        );

        Ok(Self {
            database_url,
            bind_addr,
            frontend_origins,
            admin,
            session_secret,
            preview_length,
            seed_sample_posts,
            db_connect_attempts,
            db_connect_retry_delay,
        })
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; SECRET_LEN]> {
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .context("SESSION_SECRET must be base64")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("SESSION_SECRET must decode to {SECRET_LEN} bytes, got {}", b.len()))
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")]), true).unwrap();
        assert_eq!(config.bind_addr.port(), 31113);
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.db_connect_attempts, 2);
        assert_eq!(config.db_connect_retry_delay, Duration::from_secs(10));
        assert!(config.session_secret.is_none());
        assert!(config.preview_length.is_none());
        assert!(!config.seed_sample_posts);
    }

    #[test]
    fn database_url_is_required() {
        assert!(ApiConfig::from_lookup(lookup(&[]), true).is_err());
    }

    #[test]
    fn release_requires_a_session_secret() {
        let env = [("DATABASE_URL", "postgres://db")];
        assert!(ApiConfig::from_lookup(lookup(&env), false).is_err());

        let secret = general_purpose::STANDARD.encode([7u8; SECRET_LEN]);
        let env = [("DATABASE_URL", "postgres://db"), ("SESSION_SECRET", secret.as_str())];
        let config = ApiConfig::from_lookup(lookup(&env), false).unwrap();
        assert_eq!(config.session_secret, Some([7u8; SECRET_LEN]));
    }

    #[test]
    fn short_secret_is_rejected() {
        let secret = general_purpose::STANDARD.encode([1u8; 8]);
        let env = [("DATABASE_URL", "postgres://db"), ("SESSION_SECRET", secret.as_str())];
        assert!(ApiConfig::from_lookup(lookup(&env), true).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let env = [
            ("DATABASE_URL", "postgres://db"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("FRONTEND_ORIGINS", "https://blog.example, ,https://admin.example"),
            ("POST_PREVIEW_LENGTH", "20"),
            ("SEED_SAMPLE_POSTS", "TRUE"),
            ("DB_CONNECT_ATTEMPTS", "0"),
            ("ADMIN_USER_NAME", "admin"),
        ];
        let config = ApiConfig::from_lookup(lookup(&env), true).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.frontend_origins,
            vec!["https://blog.example", "https://admin.example"]
        );
        assert_eq!(config.preview_length, Some(20));
        assert!(config.seed_sample_posts);
        assert_eq!(config.db_connect_attempts, 1);
        assert_eq!(config.admin.user_name, "admin");
        assert!(config.admin.password.is_empty());
    }

    #[test]
    fn bad_boolean_is_an_error() {
        let env = [("DATABASE_URL", "postgres://db"), ("SEED_SAMPLE_POSTS", "maybe")];
        assert!(ApiConfig::from_lookup(lookup(&env), true).is_err());
    }
}
