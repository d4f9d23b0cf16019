use super::prelude::*;

#[derive(Default)]
pub struct ReviewQueries;

#[Object]
impl ReviewQueries {
    /// Get one page of a book's reviews in ascending id order
    async fn get_reviews(
        &self,
        ctx: &Context<'_>,
        book_id: i64,
        cursor: Option<i64>,
    ) -> Result<Vec<Review>> {
        validate_id(book_id).into_gql()?;
        let page_size = *ctx.data_unchecked::<PageSize>();
        let page = parse_pagination_args(cursor, page_size).into_gql()?;
        let db = ctx.data_unchecked::<Database>();

        let records = db
            .reviews()
            .list_for_book(book_id, page.after, page.limit)
            .await
            .into_gql()?;
        Ok(records.into_iter().map(Review::from).collect())
    }

    /// Get every review written by the current user
    async fn get_my_reviews(&self, ctx: &Context<'_>) -> Result<Vec<Review>> {
        let user = ctx.auth_user()?;
        let db = ctx.data_unchecked::<Database>();

        let records = db.reviews().list_for_user(user.user_id).await.into_gql()?;
        Ok(records.into_iter().map(Review::from).collect())
    }
}
