//! Signed, time-limited tokens.
//!
//! Tokens are HS256 JWTs with three claims:
//!
//! ```text
//! { "iat": <issued at>, "exp": <iat + ttl_minutes * 60>, "data": <payload> }
//! ```
//!
//! Verification checks the signature and the expiry with zero leeway. Every
//! failure (bad signature, malformed token, expired) is reported as
//! [`TokenError::Invalid`].
//!
//! # Example
//!
//! ```rust
//! use practitioner_api::auth::{TokenPayload, TokenService};
//!
//! let tokens = TokenService::new("my-secret-key");
//! let token = tokens.issue(&TokenPayload { id: 1 }, 5).unwrap();
//!
//! let payload: TokenPayload = tokens.verify(&token).unwrap();
//! assert_eq!(payload.id, 1);
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TokenError;

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims<T> {
    /// Issued at (Unix epoch seconds)
    pub iat: u64,

    /// Expiration (Unix epoch seconds)
    pub exp: u64,

    /// Embedded payload
    pub data: T,
}

/// Payload embedded in headquarter tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Headquarter id
    pub id: i64,
}

/// Issues and verifies tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    secret_is_empty: bool,
}

impl TokenService {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            secret_is_empty: secret.is_empty(),
        }
    }

    /// Issue a token valid for `ttl_minutes` from now.
    pub fn issue<T: Serialize>(&self, payload: &T, ttl_minutes: u64) -> Result<String, TokenError> {
        let issued_at = now_secs();
        let expiry = issued_at.saturating_add(ttl_minutes.saturating_mul(60));
        self.sign(payload, issued_at, expiry)
    }

    /// Issue a token that expires at the given Unix timestamp.
    pub fn issue_with_expiry<T: Serialize>(
        &self,
        payload: &T,
        expiry: u64,
    ) -> Result<String, TokenError> {
        self.sign(payload, now_secs(), expiry)
    }

    fn sign<T: Serialize>(&self, payload: &T, iat: u64, exp: u64) -> Result<String, TokenError> {
        if self.secret_is_empty {
            return Err(TokenError::Signing("secret must not be empty".to_string()));
        }

        let claims = Claims {
            iat,
            exp,
            data: payload,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its payload.
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        self.verify_claims(token).map(|claims| claims.data)
    }

    /// Verify a token and return all of its claims.
    pub fn verify_claims<T: DeserializeOwned>(&self, token: &str) -> Result<Claims<T>, TokenError> {
        decode::<Claims<T>>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(reason = %e, "token rejected");
                TokenError::Invalid
            })
    }
}

/// Current Unix time in seconds.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
