pub mod auth;
pub mod books;
pub mod reviews;

pub use auth::AuthMutations;
pub use books::BookMutations;
pub use reviews::ReviewMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ErrorExtensions, Object, Result};

    pub(crate) use crate::db::*;
    pub(crate) use crate::error::ApiError;
    pub(crate) use crate::graphql::auth::{AuthExt, AuthGuard};
    pub(crate) use crate::graphql::helpers::ApiResultExt;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::AuthService;
    pub(crate) use crate::validation::*;
}
