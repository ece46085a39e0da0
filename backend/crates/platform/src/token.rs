//! Signed Token Codec
//!
//! Issues and verifies the two token kinds of a login session:
//! - `access`: short-lived, authorizes ordinary requests
//! - `refresh`: long-lived, only mints a new token pair
//!
//! The purpose is part of the signed payload, so an access token can never
//! be accepted where a refresh token is expected (and vice versa) even if
//! both purposes were configured with the same secret. Each purpose has its
//! own signing key; rotating one key does not invalidate tokens of the
//! other purpose.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Token purpose, encoded in the signed claims as `typ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Short-lived token authorizing ordinary requests
    Access,
    /// Long-lived token used only to obtain a new pair
    Refresh,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Access => "access",
            TokenPurpose::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed claims carried by both token purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: String,
    /// Token purpose
    #[serde(rename = "typ")]
    pub purpose: TokenPurpose,
    /// Unique token id. Two tokens issued in the same second would
    /// otherwise be byte-identical, and rotation needs the replacement to
    /// differ from the replaced.
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Token verification/issuance failures, one variant per distinct cause.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Malformed token or signature mismatch
    #[error("Token signature invalid or token malformed")]
    Invalid,

    /// Token expired (exp in the past)
    #[error("Token expired")]
    Expired,

    /// Valid token of the wrong purpose
    #[error("Expected a {expected} token")]
    WrongPurpose { expected: TokenPurpose },

    /// Encoding failure during issuance
    #[error("Failed to issue token: {0}")]
    Issuance(jsonwebtoken::errors::Error),

    /// System clock before the Unix epoch
    #[error("System time error")]
    Clock,
}

/// Signing material and lifetime for one token purpose.
struct PurposeKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl PurposeKey {
    fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime,
        }
    }
}

/// Dual-purpose token codec with independent keys per purpose.
pub struct TokenCodec {
    access: PurposeKey,
    refresh: PurposeKey,
}

impl TokenCodec {
    /// Create a codec from the two purpose secrets and lifetimes.
    ///
    /// `access_lifetime` is expected to be shorter than `refresh_lifetime`;
    /// the codec does not enforce this, the configuration layer does.
    pub fn new(
        access_secret: &[u8],
        access_lifetime: Duration,
        refresh_secret: &[u8],
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            access: PurposeKey::new(access_secret, access_lifetime),
            refresh: PurposeKey::new(refresh_secret, refresh_lifetime),
        }
    }

    fn key(&self, purpose: TokenPurpose) -> &PurposeKey {
        match purpose {
            TokenPurpose::Access => &self.access,
            TokenPurpose::Refresh => &self.refresh,
        }
    }

    /// Configured lifetime for a purpose.
    pub fn lifetime(&self, purpose: TokenPurpose) -> Duration {
        self.key(purpose).lifetime
    }

    /// Issue a signed token for `subject` expiring after the purpose lifetime.
    pub fn issue(&self, subject: &str, purpose: TokenPurpose) -> Result<String, TokenError> {
        let key = self.key(purpose);

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::Clock)?
            .as_secs();

        let claims = TokenClaims {
            sub: subject.to_string(),
            purpose,
            jti: format!("{:032x}", rand::random::<u128>()),
            iat: now,
            exp: now + key.lifetime.as_secs(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &key.encoding)
            .map_err(TokenError::Issuance)
    }

    /// Verify a token against the key of `expected` and check its purpose.
    ///
    /// Fails with a distinct error for signature/malformation, expiry, and
    /// purpose mismatch.
    pub fn verify(&self, token: &str, expected: TokenPurpose) -> Result<TokenClaims, TokenError> {
        let key = self.key(expected);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<TokenClaims>(token, &key.decoding, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        if data.claims.purpose != expected {
            return Err(TokenError::WrongPurpose { expected });
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec() -> TokenCodec {
        TokenCodec::new(
            b"access-secret-for-tests",
            Duration::from_secs(15 * 60),
            b"refresh-secret-for-tests",
            Duration::from_secs(10 * 24 * 3600),
        )
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let codec = test_codec();

        let token = codec.issue("user-42", TokenPurpose::Access).unwrap();
        let claims = codec.verify(&token, TokenPurpose::Access).unwrap();

        assert_eq!(claims.sub, "user-42");
        assert_eq!(claims.purpose, TokenPurpose::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_purpose_cross_acceptance_fails_both_ways() {
        let codec = test_codec();

        let access = codec.issue("user-42", TokenPurpose::Access).unwrap();
        let refresh = codec.issue("user-42", TokenPurpose::Refresh).unwrap();

        assert!(codec.verify(&access, TokenPurpose::Refresh).is_err());
        assert!(codec.verify(&refresh, TokenPurpose::Access).is_err());
    }

    #[test]
    fn test_purpose_mismatch_with_shared_secret() {
        // Payload check must reject even when both purposes share a key
        let codec = TokenCodec::new(
            b"shared-secret",
            Duration::from_secs(60),
            b"shared-secret",
            Duration::from_secs(3600),
        );

        let access = codec.issue("user-42", TokenPurpose::Access).unwrap();
        let err = codec.verify(&access, TokenPurpose::Refresh).unwrap_err();
        assert!(matches!(
            err,
            TokenError::WrongPurpose {
                expected: TokenPurpose::Refresh
            }
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec = test_codec();
        let other = TokenCodec::new(
            b"different-access-secret",
            Duration::from_secs(60),
            b"different-refresh-secret",
            Duration::from_secs(3600),
        );

        let token = codec.issue("user-42", TokenPurpose::Access).unwrap();
        assert!(matches!(
            other.verify(&token, TokenPurpose::Access),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let codec = test_codec();
        assert!(matches!(
            codec.verify("not-a-token", TokenPurpose::Access),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = test_codec();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = TokenClaims {
            sub: "user-42".to_string(),
            purpose: TokenPurpose::Access,
            jti: "0".repeat(32),
            iat: now - 100,
            exp: now - 50,
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"access-secret-for-tests"),
        )
        .unwrap();

        assert!(matches!(
            codec.verify(&token, TokenPurpose::Access),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_same_second_issuance_yields_distinct_tokens() {
        let codec = test_codec();

        let a = codec.issue("user-42", TokenPurpose::Refresh).unwrap();
        let b = codec.issue("user-42", TokenPurpose::Refresh).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_independent_keys_per_purpose() {
        // Rotating the access secret must not invalidate refresh tokens
        let before = test_codec();
        let refresh = before.issue("user-42", TokenPurpose::Refresh).unwrap();

        let after = TokenCodec::new(
            b"rotated-access-secret",
            Duration::from_secs(60),
            b"refresh-secret-for-tests",
            Duration::from_secs(10 * 24 * 3600),
        );

        assert!(after.verify(&refresh, TokenPurpose::Refresh).is_ok());
    }
}
