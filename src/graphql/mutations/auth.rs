//! GraphQL authentication mutations
//!
//! Registration needs no session. Logging in is a query (see
//! `queries::auth`).

use super::prelude::*;

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Register a new user account
    ///
    /// No authentication required. Fails if the email is already registered.
    async fn register(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> Result<Message> {
        validate_registration(&username, &email, &password).into_gql()?;
        let auth = ctx.data_unchecked::<AuthService>();

        match auth.register(&username, &email, &password).await {
            Ok(user) => {
                tracing::info!(
                    user_id = user.id,
                    username = %user.username,
                    "User registered successfully"
                );
                Ok(Message::new("User created"))
            }
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "User registration failed");
                Err(e.extend())
            }
        }
    }
}
