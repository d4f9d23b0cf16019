use super::prelude::*;

#[derive(Default)]
pub struct BookMutations;

#[Object]
impl BookMutations {
    /// Add a book to the catalogue
    #[graphql(guard = "AuthGuard")]
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published_year: i32,
    ) -> Result<Book> {
        let user = ctx.auth_user()?;
        validate_book(&title, &author, published_year).into_gql()?;
        let db = ctx.data_unchecked::<Database>();

        let record = db
            .books()
            .create(CreateBook {
                title,
                author,
                published_year,
            })
            .await
            .into_gql()?;

        tracing::info!(book_id = record.id, user_id = user.user_id, "Book added");
        Ok(record.into())
    }
}
