//! Platform crate: technical building blocks shared by the domain crates.
//!
//! - Argon2id password hashing with a NIST SP 800-63B style policy
//! - HMAC-signed tokens, SHA-256, base64
//! - Cookie and client header helpers

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
