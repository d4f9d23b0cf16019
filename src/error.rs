//! Error taxonomy surfaced by GraphQL operations
//!
//! Every failure a caller can see maps to one [`ApiError`] variant. The
//! variant decides both the message and the `code` extension attached to the
//! GraphQL error.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not authorized to modify this review")]
    NotAuthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("User already exists")]
    Conflict,

    #[error("Internal server error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Machine-readable code placed in the GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "BAD_USER_INPUT",
            ApiError::NotAuthenticated | ApiError::InvalidCredentials => "UNAUTHENTICATED",
            ApiError::NotAuthorized => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict => "CONFLICT",
            ApiError::Database(_) | ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Infrastructure failure rather than a problem with the caller's input
    pub fn is_internal(&self) -> bool {
        matches!(self, ApiError::Database(_) | ApiError::Internal(_))
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        match self {
            ApiError::Database(e) => tracing::error!(error = %e, "Database error"),
            ApiError::Internal(e) => tracing::error!(error = %e, "Internal error"),
            _ => {}
        }

        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}
