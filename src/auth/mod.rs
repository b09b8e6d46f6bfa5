pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use password::{hash_password, verify_password, PasswordError};

/// Upper bound on token lifetime (ten years)
pub const MAX_EXPIRY_HOURS: u64 = 24 * 365 * 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Caller identity (the user's email)
    pub sub: String,
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(identity: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours.min(MAX_EXPIRY_HOURS) as i64)).timestamp();

        Self {
            sub: identity.into(),
            jti: Uuid::new_v4().to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
    #[error("JWT expiry of {0} hours is out of range")]
    InvalidExpiry(u64),
}

/// Issues and verifies bearer credentials.
///
/// `verify` must fail closed: any token it cannot fully validate yields `None`.
pub trait TokenService: Send + Sync {
    fn issue(&self, identity: &str) -> Result<String, JwtError>;
    fn verify(&self, token: &str) -> Option<String>;
}

/// HS256 JWT tokens carrying the caller's email in `sub`
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: u64,
}

impl JwtTokenService {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }
        if expiry_hours > MAX_EXPIRY_HOURS {
            return Err(JwtError::InvalidExpiry(expiry_hours));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &str) -> Result<String, JwtError> {
        self.encode_claims(&Claims::new(identity, self.expiry_hours))
    }

    fn verify(&self, token: &str) -> Option<String> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| tracing::debug!("Rejected bearer token: {}", e))
            .ok()?;

        let identity = token_data.claims.sub;
        if identity.trim().is_empty() {
            return None;
        }
        Some(identity)
    }
}
