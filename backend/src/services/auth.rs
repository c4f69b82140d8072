//! Dashboard authentication
//!
//! The dashboard login is an injected `AuthProvider` capability: the
//! account name and bcrypt password hash come from configuration, and a
//! successful login yields a signed session token. No credential literal
//! lives in source.

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use shared::models::SessionToken;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account name
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Capability for issuing and checking dashboard sessions.
pub trait AuthProvider: Send + Sync {
    /// Verify credentials and issue a session token.
    fn login(&self, username: &str, password: &str) -> AppResult<SessionToken>;

    /// Validate a session token and return its claims.
    fn verify_session(&self, token: &str) -> AppResult<Claims>;
}

/// AuthProvider backed by configuration
#[derive(Clone)]
pub struct ConfigAuthProvider {
    username: String,
    password_hash: String,
    token_secret: String,
    token_expiry: i64,
}

impl ConfigAuthProvider {
    /// Create a new ConfigAuthProvider instance
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            username: config.username.clone(),
            password_hash: config.password_hash.clone(),
            token_secret: config.token_secret.clone(),
            token_expiry: config.token_expiry,
        }
    }
}

impl AuthProvider for ConfigAuthProvider {
    fn login(&self, username: &str, password: &str) -> AppResult<SessionToken> {
        if username != self.username {
            return Err(AppError::InvalidCredentials);
        }

        let matches = verify(password, &self.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !matches {
            return Err(AppError::InvalidCredentials);
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: self.username.clone(),
            exp: now + self.token_expiry,
            iat: now,
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.token_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))?;

        Ok(SessionToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_expiry,
        })
    }

    fn verify_session(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.token_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidCredentials)?;

        Ok(data.claims)
    }
}
