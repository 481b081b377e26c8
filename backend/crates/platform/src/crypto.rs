//! Cryptographic helpers.
//!
//! Session tokens are `<payload>.<base64url(HMAC-SHA256(payload))>`.

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Length of secrets accepted by [`sign_token`].
pub const SECRET_LEN: usize = 32;

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random 32-byte secret, used when none is configured (development only).
pub fn random_secret() -> [u8; SECRET_LEN] {
    let mut secret = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut secret);
    secret
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

fn mac_for(secret: &[u8; SECRET_LEN], payload: &str) -> HmacSha256 {
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 accepts any key length"),
    };
    mac.update(payload.as_bytes());
    mac
}

/// Appends a URL-safe HMAC signature to `payload`.
pub fn sign_token(secret: &[u8; SECRET_LEN], payload: &str) -> String {
    let tag = mac_for(secret, payload).finalize().into_bytes();
    format!(
        "{payload}.{}",
        general_purpose::URL_SAFE_NO_PAD.encode(tag)
    )
}

/// Checks the signature of a token produced by [`sign_token`] and returns
/// the payload. Comparison is constant-time.
pub fn verify_token<'a>(secret: &[u8; SECRET_LEN], token: &'a str) -> Option<&'a str> {
    let (payload, signature) = token.rsplit_once('.')?;
    let signature = general_purpose::URL_SAFE_NO_PAD.decode(signature).ok()?;
    mac_for(secret, payload)
        .verify_slice(&signature)
        .ok()
        .map(|_| payload)
}
