//! Stateless session tokens.
//!
//! A session is a signed JWT carrying the username and its issuance time.
//! Validity is `iat .. iat + SESSION_LIFETIME_DAYS`; there is no `exp` claim,
//! so the window is enforced here rather than by the JWT library.
//!
//! Only the HMAC family is trusted for signatures. The declared header
//! algorithm is checked against the allow-list before any verification, so a
//! token declaring `none` (or an asymmetric algorithm) is rejected as
//! `UnsupportedAlgorithm` no matter what its claims or signature say.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::Serialize;
use thiserror::Error;

const SESSION_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("token cannot be parsed")]
    Malformed,
    #[error("unsupported signing algorithm")]
    UnsupportedAlgorithm,
    #[error("signature verification failed")]
    BadSignature,
    #[error("required claims missing or invalid")]
    MissingClaims,
    #[error("session expired")]
    Expired,
    #[error("failed to sign token")]
    Signing,
}

#[derive(Debug, Serialize)]
struct SessionClaims {
    username: String,
    iat: i64,
}

/// Issues and validates session tokens under a single shared secret.
///
/// Immutable after construction; shared by all requests without locking.
#[derive(Clone)]
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_secs: i64,
}

impl std::fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("SessionCodec")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish()
    }
}

impl SessionCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs: SESSION_LIFETIME_DAYS * 24 * 60 * 60,
        }
    }

    /// Issue a session token for `username`, valid from now.
    pub fn issue(&self, username: &str) -> Result<String, SessionError> {
        self.issue_at(username, Utc::now().timestamp())
    }

    /// Validate a token and return the username it was issued for.
    pub fn validate(&self, token: &str) -> Result<String, SessionError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    fn issue_at(&self, username: &str, iat: i64) -> Result<String, SessionError> {
        let claims = SessionClaims {
            username: username.to_string(),
            iat,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                tracing::error!(error = %e, "failed to sign session token");
                SessionError::Signing
            },
        )
    }

    fn validate_at(&self, token: &str, now: i64) -> Result<String, SessionError> {
        let alg = declared_algorithm(token)?;

        let mut validation = Validation::new(alg);
        // Expiry is iat-based (checked below); there is no exp claim to validate.
        validation.validate_exp = false;
        validation.required_spec_claims.remove("exp");

        let data = jsonwebtoken::decode::<serde_json::Value>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => SessionError::BadSignature,
                _ => SessionError::Malformed,
            })?;

        let username = data
            .claims
            .get("username")
            .and_then(serde_json::Value::as_str)
            .ok_or(SessionError::MissingClaims)?;
        let iat = data
            .claims
            .get("iat")
            .and_then(serde_json::Value::as_i64)
            .ok_or(SessionError::MissingClaims)?;

        if now >= iat + self.lifetime_secs {
            return Err(SessionError::Expired);
        }

        Ok(username.to_string())
    }
}

/// Read the algorithm the token header declares, accepting only the HMAC
/// family. Parsed by hand: the library's header type cannot represent
/// rejected algorithms such as `none`, and those must classify as
/// `UnsupportedAlgorithm`, not as a parse failure.
fn declared_algorithm(token: &str) -> Result<Algorithm, SessionError> {
    let header_b64 = token.split('.').next().ok_or(SessionError::Malformed)?;
    let raw = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| SessionError::Malformed)?;
    let header: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|_| SessionError::Malformed)?;

    match header.get("alg").and_then(serde_json::Value::as_str) {
        Some("HS256") => Ok(Algorithm::HS256),
        Some("HS384") => Ok(Algorithm::HS384),
        Some("HS512") => Ok(Algorithm::HS512),
        _ => Err(SessionError::UnsupportedAlgorithm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-test-secret";
    const DAY: i64 = 24 * 60 * 60;

    fn codec() -> SessionCodec {
        SessionCodec::new(SECRET)
    }

    /// Build a token with an arbitrary raw header and claims, signed (or not)
    /// outside the codec.
    fn handcrafted(header: &str, claims: &str, signature: &[u8]) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims),
            URL_SAFE_NO_PAD.encode(signature),
        )
    }

    #[test]
    fn round_trip_returns_principal() {
        let codec = codec();
        let token = codec.issue("alice").unwrap();
        assert_eq!(codec.validate(&token).unwrap(), "alice");
    }

    #[test]
    fn token_expires_after_lifetime() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let token = codec.issue_at("alice", now - 8 * DAY).unwrap();
        assert_eq!(codec.validate_at(&token, now), Err(SessionError::Expired));
    }

    #[test]
    fn token_valid_until_the_last_second() {
        let codec = codec();
        let iat = 1_000_000;
        let token = codec.issue_at("alice", iat).unwrap();

        let last_valid = iat + 7 * DAY - 1;
        assert_eq!(codec.validate_at(&token, last_valid).unwrap(), "alice");
        assert_eq!(
            codec.validate_at(&token, last_valid + 1),
            Err(SessionError::Expired)
        );
    }

    #[test]
    fn alg_none_is_rejected() {
        let token = handcrafted(
            r#"{"alg":"none","typ":"JWT"}"#,
            r#"{"username":"mallory","iat":9999999999}"#,
            b"",
        );
        assert_eq!(
            codec().validate(&token),
            Err(SessionError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn asymmetric_alg_is_rejected_before_verification() {
        // Signature is garbage; the algorithm check must fire first.
        let token = handcrafted(
            r#"{"alg":"RS256","typ":"JWT"}"#,
            r#"{"username":"mallory","iat":9999999999}"#,
            b"not-a-signature",
        );
        assert_eq!(
            codec().validate(&token),
            Err(SessionError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn missing_alg_is_rejected() {
        let token = handcrafted(r#"{"typ":"JWT"}"#, r#"{"username":"x","iat":1}"#, b"");
        assert_eq!(
            codec().validate(&token),
            Err(SessionError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let token = SessionCodec::new("other-secret").issue("alice").unwrap();
        assert_eq!(codec().validate(&token), Err(SessionError::BadSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(codec().validate("garbage"), Err(SessionError::Malformed));
        assert_eq!(codec().validate("a.b.c"), Err(SessionError::Malformed));
        assert_eq!(codec().validate(""), Err(SessionError::Malformed));
    }

    #[test]
    fn missing_username_claim_is_rejected() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "iat": now }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(codec.validate(&token), Err(SessionError::MissingClaims));
    }

    #[test]
    fn wrong_typed_iat_claim_is_rejected() {
        let codec = codec();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "username": "alice", "iat": "yesterday" }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(codec.validate(&token), Err(SessionError::MissingClaims));
    }

    #[test]
    fn hs384_family_is_accepted() {
        let now = Utc::now().timestamp();
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS384),
            &serde_json::json!({ "username": "alice", "iat": now }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(codec().validate(&token).unwrap(), "alice");
    }
}
