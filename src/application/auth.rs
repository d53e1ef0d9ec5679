pub mod token;
pub mod token_lifetime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::adapters::config::auth_config::AuthConfig;

use self::token::Claims;
use self::token_lifetime::{TokenLifetime, TokenLifetimeError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Malformed token")]
    MalformedToken,
    #[error("Token signature mismatch")]
    InvalidSignature,
    #[error("Token expired")]
    Expired,
    #[error("Failed to sign token")]
    Signing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: String,
}

/// Static single-account login backed by signed, expiring tokens.
pub struct AuthService {
    username: String,
    password: String,
    secret: Vec<u8>,
    lifetime: TokenLifetime,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("username", &self.username)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Result<Self, TokenLifetimeError> {
        Ok(Self {
            username: config.username.clone(),
            password: config.password.clone(),
            secret: config.secret.as_bytes().to_vec(),
            lifetime: config.expires_in.parse()?,
        })
    }

    pub fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<IssuedToken, AuthError> {
        self.login_at(username, password, Utc::now())
    }

    #[instrument(skip(self, password))]
    pub fn login_at(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        if username != Some(self.username.as_str()) || password != Some(self.password.as_str()) {
            tracing::warn!("Rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let issued_at = now.timestamp();
        let claims = Claims {
            username: self.username.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.lifetime.seconds()),
        };

        Ok(IssuedToken {
            token: token::sign(&claims, &self.secret)?,
            expires_in: self.lifetime.as_str().to_string(),
        })
    }

    pub fn verify(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let token = token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;
        token::decode(token, &self.secret, now.timestamp())
    }
}
