//! Unverified JWT payload decoding.
//!
//! This is not a security check. The payload is read only to learn the
//! `exp` claim and skip a token round-trip while the cached token is still
//! fresh; the SSO server remains the source of truth and will reject
//! anything stale or tampered with.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Claims read from the token payload. Only `exp` is of interest.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Claims {
    /// Expiry instant, seconds since epoch.
    pub exp: u64,
}

impl Claims {
    pub fn is_expired(&self, now: u64) -> bool {
        self.exp <= now
    }
}

/// Decode the payload segment of a compact-serialized token.
///
/// Splits on `.`, takes the second segment, translates the URL-safe
/// base64 alphabet to the standard one and parses the decoded bytes as
/// JSON. Fails with [`Error::MalformedToken`] on any shape violation.
pub fn decode(token: &str) -> Result<Claims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() < 2 {
        return Err(Error::MalformedToken(
            "expected dot-separated compact serialization".into(),
        ));
    }

    let payload = parts[1].replace('-', "+").replace('_', "/");
    let decoded = STANDARD_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| Error::MalformedToken(format!("payload is not base64: {e}")))?;

    serde_json::from_slice::<Claims>(&decoded)
        .map_err(|e| Error::MalformedToken(format!("payload is not a claims object: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::time::now_u64;

    fn sample_jwt(exp: u64) -> String {
        // minimal unsigned JWT for tests: {"exp": exp}
        let header = STANDARD_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = STANDARD_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
        format!("{}.{}.", header, payload)
    }

    #[test]
    fn round_trips_exp_claim() {
        let exp = now_u64() + 3600;
        let claims = decode(&sample_jwt(exp)).unwrap();
        assert_eq!(claims.exp, exp);
        assert!(!claims.is_expired(now_u64()));
    }

    #[test]
    fn expired_at_exactly_exp() {
        let claims = Claims { exp: 1000 };
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
        assert!(!claims.is_expired(999));
    }

    #[test]
    fn rejects_single_segment() {
        assert!(matches!(
            decode("no-dots-here"),
            Err(Error::MalformedToken(_))
        ));
    }

    #[test]
    fn rejects_non_base64_payload() {
        assert!(matches!(
            decode("aaa.###not-base64###.bbb"),
            Err(Error::MalformedToken(_))
        ));
    }

    #[test]
    fn rejects_non_json_payload() {
        let payload = STANDARD_NO_PAD.encode("plain text");
        assert!(matches!(
            decode(&format!("aaa.{payload}.bbb")),
            Err(Error::MalformedToken(_))
        ));
    }

    #[test]
    fn accepts_url_safe_alphabet() {
        // "ÿ" encodes to bytes whose standard base64 spelling contains '/';
        // the URL-safe spelling folds that to '_'
        let raw = r#"{"exp":4102444800,"sub":"ÿÿÿ"}"#;
        let url_safe = base64::engine::general_purpose::URL_SAFE.encode(raw);
        assert!(url_safe.contains('_'));

        let claims = decode(&format!("h.{url_safe}.s")).unwrap();
        assert_eq!(claims.exp, 4102444800);
    }

    #[test]
    fn accepts_padded_payload() {
        let padded = base64::engine::general_purpose::STANDARD.encode(r#"{"exp":42}"#);
        assert!(padded.ends_with('='));

        let claims = decode(&format!("h.{padded}.s")).unwrap();
        assert_eq!(claims.exp, 42);
    }

    #[test]
    fn two_segments_without_signature_decode() {
        let payload = STANDARD_NO_PAD.encode(r#"{"exp":42}"#);
        let claims = decode(&format!("header.{payload}")).unwrap();
        assert_eq!(claims.exp, 42);
    }
}
