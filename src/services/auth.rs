//! Authentication service for user management and JWT handling
//!
//! Provides:
//! - User registration and login
//! - Password hashing with bcrypt
//! - Session token issuing and verification

use anyhow::anyhow;
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::db::{CreateUser, Database, UserRecord};
use crate::error::{ApiError, ApiResult};
use crate::graphql::auth::AuthUser;

// ============================================================================
// JWT Claims
// ============================================================================

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID (subject)
    pub sub: i64,
    /// Email of the user at issue time
    pub email: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

// ============================================================================
// Configuration
// ============================================================================

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub token_lifetime: i64,
    /// Bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            token_lifetime: config.token_lifetime_hours.saturating_mul(60 * 60),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

// ============================================================================
// Auth Service
// ============================================================================

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Session token lifetime in seconds
    pub fn token_lifetime(&self) -> i64 {
        self.config.token_lifetime
    }

    // ========================================================================
    // User Registration
    // ========================================================================

    /// Register a new user. Input must already be validated.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<UserRecord> {
        let users = self.db.users();

        if users.get_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict);
        }

        let password_hash = self.hash_password(password)?;

        // A concurrent registration can still win the race to the UNIQUE index
        users
            .create(CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    ApiError::Conflict
                }
                other => ApiError::Database(other),
            })
    }

    // ========================================================================
    // Login
    // ========================================================================

    /// Check credentials and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<(UserRecord, String)> {
        let user = self
            .db
            .users()
            .get_by_email(email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Sign a session token for a user
    pub fn issue_token(&self, user: &UserRecord) -> ApiResult<String> {
        let now = Utc::now();
        let expires_at = Duration::try_seconds(self.config.token_lifetime)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ApiError::Internal(anyhow!(
                    "Session token lifetime of {}s is out of range",
                    self.config.token_lifetime
                ))
            })?;

        let claims = SessionClaims {
            sub: user.id,
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(anyhow!("Failed to create session token: {}", e)))
    }

    /// Verify signature and expiry of a session token
    pub fn decode_token(&self, token: &str) -> ApiResult<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            ApiError::NotAuthenticated
        })?;

        Ok(token_data.claims)
    }

    /// Resolve a session token to the user it belongs to
    ///
    /// The user must still exist and carry the email the token was issued for.
    pub async fn authenticate(&self, token: &str) -> ApiResult<AuthUser> {
        let claims = self.decode_token(token)?;

        let user = self
            .db
            .users()
            .get_by_id(claims.sub)
            .await?
            .ok_or(ApiError::NotAuthenticated)?;

        if user.email != claims.email {
            return Err(ApiError::NotAuthenticated);
        }

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
        })
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Hash a password with bcrypt
    pub fn hash_password(&self, password: &str) -> ApiResult<String> {
        hash(password, self.config.bcrypt_cost)
            .map_err(|e| ApiError::Internal(anyhow!("Failed to hash password: {}", e)))
    }

    /// Verify a password against a hash
    fn verify_password(&self, password: &str, hash: &str) -> ApiResult<bool> {
        verify(password, hash)
            .map_err(|e| ApiError::Internal(anyhow!("Failed to verify password: {}", e)))
    }
}
