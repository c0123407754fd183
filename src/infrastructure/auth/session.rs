//! Signed session tokens issued on sign-in

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::User;
use crate::domain::DomainError;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    /// Issued at (Unix epoch)
    pub iat: i64,
    /// Expiration (Unix epoch)
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(user: &User, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(ttl_hours);

        Self {
            sub: user.id().to_string(),
            email: user.email().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Session signing and cookie settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_hours: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl SessionConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours: 24 * 14,
            cookie_name: "sessionid".to_string(),
            cookie_secure: false,
        }
    }

    pub fn with_ttl_hours(mut self, ttl_hours: i64) -> Self {
        self.ttl_hours = ttl_hours;
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, secure: bool) -> Self {
        self.cookie_name = name.into();
        self.cookie_secure = secure;
        self
    }
}

/// Trait for session token operations
pub trait SessionIssuer: Send + Sync + Debug {
    /// Sign a session token for a user
    fn issue(&self, user: &User) -> Result<String, DomainError>;

    /// Verify a token and return its claims
    fn validate(&self, token: &str) -> Result<SessionClaims, DomainError>;

    /// `Set-Cookie` value carrying the token
    fn cookie(&self, token: &str) -> String;
}

/// HS256 session service
#[derive(Clone)]
pub struct SessionService {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("ttl_hours", &self.config.ttl_hours)
            .field("cookie_name", &self.config.cookie_name)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl SessionIssuer for SessionService {
    fn issue(&self, user: &User) -> Result<String, DomainError> {
        let claims = SessionClaims::new(user, self.config.ttl_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign session: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<SessionClaims, DomainError> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| DomainError::validation(format!("Invalid session: {}", e)))
    }

    fn cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
            self.config.cookie_name,
            token,
            self.config.ttl_hours * 3600
        );

        if self.config.cookie_secure {
            cookie.push_str("; Secure");
        }

        cookie
    }
}
