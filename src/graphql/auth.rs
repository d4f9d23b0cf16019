//! GraphQL authentication and authorization
//!
//! The session token is verified once at the HTTP boundary; on success an
//! [`AuthUser`] is attached to the request data. Resolvers read it through
//! [`AuthExt`].
//!
//! ## Guards
//!
//! Use `AuthGuard` to require authentication on any GraphQL operation:
//!
//! ```ignore
//! #[graphql(guard = "AuthGuard")]
//! async fn protected_mutation(&self, ctx: &Context<'_>) -> Result<Message> { ... }
//! ```
//!
//! Guards run before argument validation, so an anonymous caller always gets
//! "User not authenticated", whatever the payload.

use async_graphql::{Context, ErrorExtensions, Result};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The authenticated user of the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

/// Extension trait to get authenticated user from GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or return an error if not authenticated
    fn auth_user(&self) -> Result<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn auth_user(&self) -> Result<&AuthUser> {
        self.data_opt::<AuthUser>()
            .ok_or_else(|| ApiError::NotAuthenticated.extend())
    }
}

/// Guard that requires authentication for GraphQL operations.
///
/// Use with `#[graphql(guard = "AuthGuard")]` on queries or mutations.
pub struct AuthGuard;

impl async_graphql::Guard for AuthGuard {
    fn check(&self, ctx: &Context<'_>) -> impl std::future::Future<Output = Result<()>> + Send {
        let result = ctx.auth_user().map(|_| ());
        async move { result }
    }
}

/// Name and attributes of the cookie carrying the session token
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// `Set-Cookie` value for a freshly issued token
    ///
    /// `SameSite=None` requires `Secure`; browsers then only send the cookie
    /// over HTTPS (or to localhost).
    pub fn set_cookie_header(&self, token: &str, max_age_secs: i64) -> String {
        Cookie::build((self.name.clone(), token.to_string()))
            .path("/")
            .http_only(true)
            .secure(true)
            .same_site(SameSite::None)
            .max_age(time::Duration::seconds(max_age_secs))
            .build()
            .to_string()
    }
}
