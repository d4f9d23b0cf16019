pub mod auth;
pub mod books;
pub mod reviews;

pub use auth::AuthQueries;
pub use books::BookQueries;
pub use reviews::ReviewQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ErrorExtensions, Object, Result};

    pub(crate) use crate::db::Database;
    pub(crate) use crate::graphql::auth::{AuthExt, SessionCookie};
    pub(crate) use crate::graphql::helpers::ApiResultExt;
    pub(crate) use crate::graphql::pagination::{PageSize, parse_pagination_args};
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::AuthService;
    pub(crate) use crate::validation::{validate_credentials, validate_id};
}
