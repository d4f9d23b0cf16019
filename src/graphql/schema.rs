//! GraphQL schema definition
//!
//! Reads are public; everything that writes, and `getMyReviews`, requires a
//! session.

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;
use crate::services::AuthService;

use super::auth::SessionCookie;
use super::mutations::{AuthMutations, BookMutations, ReviewMutations};
use super::pagination::PageSize;
use super::queries::{AuthQueries, BookQueries, ReviewQueries};

/// The GraphQL schema type
pub type ShelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(BookQueries, ReviewQueries, AuthQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutations, BookMutations, ReviewMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(
    db: Database,
    auth_service: AuthService,
    session_cookie: SessionCookie,
    page_size: PageSize,
) -> ShelfSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(db)
        .data(auth_service)
        .data(session_cookie)
        .data(page_size)
        .finish()
}
