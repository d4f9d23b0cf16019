//! Application configuration management

use std::env;

use anyhow::{Context, Result};

/// Fallback signing secret. Any real deployment must set `JWT_SECRET`.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Accepted range for `TOKEN_LIFETIME_HOURS`, up to one year
const TOKEN_LIFETIME_HOURS: std::ops::RangeInclusive<i64> = 1..=8760;

/// Cheapest cost bcrypt accepts
#[cfg(test)]
const TEST_BCRYPT_COST: u32 = 4;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// SQLite database URL or path
    pub database_url: String,

    /// Maximum size of the database connection pool
    pub database_max_connections: u32,

    /// JWT secret for signing and verifying session tokens
    pub jwt_secret: String,

    /// Session token lifetime in hours
    pub token_lifetime_hours: i64,

    /// Name of the cookie carrying the session token
    pub session_cookie: String,

    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,

    /// Number of items returned per page by paginated queries
    pub page_size: i64,

    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,

    /// Seed demo data at startup
    pub seed_database: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Prefer DATABASE_PATH, fall back to DATABASE_URL
        let database_url = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "sqlite://./data/shelfnote.db".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost,https://studio.apollographql.com".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,

            jwt_secret,

            token_lifetime_hours: parse_token_lifetime(
                &env::var("TOKEN_LIFETIME_HOURS").unwrap_or_else(|_| "12".to_string()),
            )?,

            session_cookie: env::var("SESSION_COOKIE").unwrap_or_else(|_| "token".to_string()),

            bcrypt_cost: match env::var("BCRYPT_COST") {
                Ok(v) => v.parse().context("Invalid BCRYPT_COST")?,
                Err(_) => bcrypt::DEFAULT_COST,
            },

            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("Invalid PAGE_SIZE")?,

            cors_origins,

            seed_database: env::var("SEED_DATABASE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    /// Whether the signing secret is still the built-in fallback
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// Parse the session lifetime in hours, rejecting values outside one year
fn parse_token_lifetime(raw: &str) -> Result<i64> {
    let hours: i64 = raw.trim().parse().context("Invalid TOKEN_LIFETIME_HOURS")?;
    anyhow::ensure!(
        TOKEN_LIFETIME_HOURS.contains(&hours),
        "Invalid TOKEN_LIFETIME_HOURS: {} is outside {}..={}",
        hours,
        TOKEN_LIFETIME_HOURS.start(),
        TOKEN_LIFETIME_HOURS.end()
    );
    Ok(hours)
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4000,
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            jwt_secret: "test-secret".to_string(),
            token_lifetime_hours: 12,
            session_cookie: "token".to_string(),
            bcrypt_cost: TEST_BCRYPT_COST,
            page_size: 3,
            cors_origins: vec!["http://localhost".to_string()],
            seed_database: false,
        }
    }
}
