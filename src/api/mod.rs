//! REST route definitions
//!
//! The API itself is GraphQL at /graphql. Only probes live here.

pub mod health;
