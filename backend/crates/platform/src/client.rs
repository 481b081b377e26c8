//! Client identification from request headers.

use axum::http::{HeaderMap, header};

use crate::crypto::sha256;

/// Hash of the caller's User-Agent. Sessions are bound to it so a stolen
/// cookie replayed from another browser is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFingerprint {
    pub hash: [u8; 32],
    pub user_agent: Option<String>,
}

impl ClientFingerprint {
    pub fn hash_vec(&self) -> Vec<u8> {
        self.hash.to_vec()
    }

    pub fn matches(&self, stored: &[u8]) -> bool {
        self.hash.as_slice() == stored
    }
}

/// Builds the fingerprint. A missing User-Agent hashes as the empty string.
pub fn extract_fingerprint(headers: &HeaderMap) -> ClientFingerprint {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let hash = sha256(user_agent.as_deref().unwrap_or_default().as_bytes());

    ClientFingerprint { hash, user_agent }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn same_agent_same_fingerprint() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.5"));

        let a = extract_fingerprint(&headers);
        let b = extract_fingerprint(&headers);
        assert_eq!(a, b);
        assert_eq!(a.user_agent.as_deref(), Some("curl/8.5"));
        assert!(a.matches(&b.hash_vec()));
    }

    #[test]
    fn missing_agent_still_fingerprints() {
        let fp = extract_fingerprint(&HeaderMap::new());
        assert_eq!(fp.user_agent, None);
        assert_eq!(fp.hash, sha256(b""));
    }
}
