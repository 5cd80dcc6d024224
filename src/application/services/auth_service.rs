//! Authentication service: API-key verification and bearer token handling.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Fixed bearer token lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried in a signed bearer token.
///
/// Stateless: nothing is persisted server-side, each request verifies the
/// signature and expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated user.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Service backing both auth gates.
///
/// The configured API secret is stored as a SHA-256 digest; a presented key
/// is digested the same way and the two fixed-length digests are compared in
/// constant time.
pub struct AuthService {
    api_key_digest: [u8; 32],
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(api_secret: &str, jwt_secret: &str) -> Self {
        Self {
            api_key_digest: Sha256::digest(api_secret.as_bytes()).into(),
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Compares a presented API key against the configured secret.
    pub fn verify_api_key(&self, presented: &str) -> bool {
        let presented: [u8; 32] = Sha256::digest(presented.as_bytes()).into();
        constant_time_eq(&presented, &self.api_key_digest)
    }

    /// Issues a signed bearer token for a username with the fixed expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue_token(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            AppError::internal("Failed to issue token", "internal error")
        })
    }

    /// Verifies a bearer token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with a distinct detail per failure
    /// mode: expired token, invalid signature, or otherwise invalid claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Unauthorized", "Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Unauthorized", "Invalid token signature")
                }
                _ => AppError::unauthorized("Unauthorized", format!("Invalid token: {}", e)),
            })
    }
}

/// Constant-time equality over fixed-length digests.
fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
