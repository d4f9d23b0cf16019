//! GraphQL API
//!
//! The single API surface for books, reviews and accounts, built with
//! async-graphql. Queries and mutations are split per domain under
//! `queries/` and `mutations/` and merged into the roots in `schema.rs`.

pub mod auth;
pub mod helpers;
pub mod mutations;
pub mod pagination;
pub mod queries;
mod schema;
pub mod types;


pub use auth::SessionCookie;
pub use pagination::PageSize;
pub use schema::{ShelfSchema, build_schema};
