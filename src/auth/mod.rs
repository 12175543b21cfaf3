pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::Config;
use crate::error::AppError;

// Re-export necessary items
pub use extractors::{AuthenticatedUser, RefreshIdentity};
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer, TokenKind};

/// Everything the auth handlers and middleware need, shared as application data.
pub struct AuthState {
    pub tokens: TokenIssuer,
    pub bcrypt_cost: u32,
}

impl AuthState {
    pub fn new(secret: &str, access_ttl: i64, refresh_ttl: i64, bcrypt_cost: u32) -> Self {
        Self {
            tokens: TokenIssuer::new(secret, access_ttl, refresh_ttl),
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            config.access_token_ttl,
            config.refresh_token_ttl,
            config.bcrypt_cost,
        )
    }

    /// Issues a fresh access/refresh pair for `username`.
    pub fn issue_pair(&self, username: &str) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.tokens.issue(username, TokenKind::Access)?,
            refresh_token: self.tokens.issue(username, TokenKind::Refresh)?,
        })
    }
}

/// JSON payload for `/signup` and `/login`.
///
/// Both fields are optional at the serde level so that a missing field turns into
/// a readable validation message instead of a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default)]
    #[validate(length(max = 80, message = "Username must be at most 80 characters"))]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    /// Returns `(username, password)`, checking username first.
    pub fn required(&self) -> Result<(&str, &str), AppError> {
        let username = non_empty(&self.username)
            .ok_or_else(|| AppError::ValidationError("Missing username parameter".into()))?;
        let password = non_empty(&self.password)
            .ok_or_else(|| AppError::ValidationError("Missing password parameter".into()))?;
        Ok((username, password))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Response body for a successful signup or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Response body for a successful refresh.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}
