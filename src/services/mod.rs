//! Business services shared by the GraphQL layer

pub mod auth;

pub use auth::{AuthConfig, AuthService};
