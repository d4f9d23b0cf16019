// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::ErrorExtensions;

use crate::error::ApiError;

/// Convert service and repository errors into GraphQL errors carrying a `code`
pub(crate) trait ApiResultExt<T> {
    fn into_gql(self) -> async_graphql::Result<T>;
}

impl<T, E> ApiResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn into_gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.into().extend())
    }
}
