//! Authentication and authorization
//!
//! JWTs carry the account id and role; middleware turns a valid token into
//! an explicit [`Actor`] before any handler runs. Password hashing lives
//! here too so handlers never touch bcrypt directly.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{Actor, Role, UserId};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (account id, decimal digits)
    pub sub: String,
    /// Account role
    pub role: Role,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

/// Creates a signed token for an authenticated account
pub fn create_token(
    actor: Actor,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = TokenClaims {
        sub: actor.user_id.to_string(),
        role: actor.role,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a token and resolves the actor it names
pub fn validate_token(token: &str, secret: &str) -> Result<Actor, AuthError> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    let claims = token_data.claims;
    let raw_id: i64 = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
    let user_id = UserId::new(raw_id).map_err(|_| AuthError::InvalidToken)?;

    Ok(Actor::new(user_id, claims.role))
}

/// Hashes a password for storage
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Checks a login password against the stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    match bcrypt::verify(password, hash) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthError::InvalidCredentials),
        // A malformed hash in storage is indistinguishable from a bad
        // password as far as the caller is concerned.
        Err(_) => Err(AuthError::InvalidCredentials),
    }
}
