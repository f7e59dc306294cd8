//! Unverified token payload decoding.
//!
//! The gate never re-verifies token signatures: the backend issued the
//! token, the backend verifies it on every call, and transport is TLS.
//! That is a deliberate trust boundary — the decoded payload is only used
//! to fill display fields the backend response omitted, never to make an
//! authorization decision.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::model::TokenPayload;

/// Decode the payload segment of a bearer token as raw JSON.
///
/// Returns `None` unless the token has exactly three `.`-separated
/// segments and the middle one is valid base64url-encoded JSON.
pub fn decode_claims(token: &str) -> Option<serde_json::Value> {
    let mut parts = token.split('.');
    let (_header, payload, _sig) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Decode the payload into the known claim shape.
pub fn decode_payload(token: &str) -> Option<TokenPayload> {
    serde_json::from_value(decode_claims(token)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_payload(json: &serde_json::Value) -> String {
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(json).unwrap());
        format!("hdr.{body}.sig")
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(decode_claims("abc").is_none());
        assert!(decode_claims("a.b").is_none());
        assert!(decode_claims("a.b.c.d").is_none());
    }

    #[test]
    fn rejects_bad_base64_and_bad_json() {
        assert!(decode_claims("a.!!!.c").is_none());
        let not_json = URL_SAFE_NO_PAD.encode(b"not json");
        assert!(decode_claims(&format!("a.{not_json}.c")).is_none());
    }

    #[test]
    fn decodes_well_formed_payload() {
        let token = encode_payload(&serde_json::json!({"sub": "u1", "role": "manager"}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims["sub"], "u1");
        assert_eq!(claims["role"], "manager");

        let payload = decode_payload(&token).unwrap();
        assert_eq!(payload.sub.as_deref(), Some("u1"));
        assert_eq!(payload.role.as_deref(), Some("manager"));
    }

    #[test]
    fn unknown_claims_are_ignored() {
        let token = encode_payload(&serde_json::json!({
            "sub": "u2", "iat": 1, "sid": "s1", "custom": {"x": 1}
        }));
        let payload = decode_payload(&token).unwrap();
        assert_eq!(payload.sub.as_deref(), Some("u2"));
        assert!(payload.role.is_none());
    }

    #[test]
    fn decodes_real_jwt() {
        // Signed with jsonwebtoken to confirm the wire format matches.
        #[derive(serde::Serialize)]
        struct Claims {
            sub: String,
            role: String,
            exp: i64,
        }
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &Claims { sub: "u3".into(), role: "staff".into(), exp: 4_000_000_000 },
            &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let payload = decode_payload(&token).unwrap();
        assert_eq!(payload.sub.as_deref(), Some("u3"));
        assert_eq!(payload.role.as_deref(), Some("staff"));
        assert_eq!(payload.exp, Some(4_000_000_000));
    }
}
