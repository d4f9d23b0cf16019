use axum::http::header::{ACCESS_CONTROL_ALLOW_CREDENTIALS, SET_COOKIE};

use super::prelude::*;

#[derive(Default)]
pub struct AuthQueries;

#[Object]
impl AuthQueries {
    /// Authenticate with email and password
    ///
    /// On success the session token is returned in a `Set-Cookie` header.
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<Message> {
        validate_credentials(&email, &password).into_gql()?;
        let auth = ctx.data_unchecked::<AuthService>();
        let cookie = ctx.data_unchecked::<SessionCookie>();

        let (user, token) = match auth.login(&email, &password).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Login failed");
                return Err(e.extend());
            }
        };

        ctx.insert_http_header(SET_COOKIE, cookie.set_cookie_header(&token, auth.token_lifetime()));
        ctx.insert_http_header(ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");

        tracing::info!(user_id = user.id, "User logged in successfully");
        Ok(Message::new("User logged in"))
    }
}
