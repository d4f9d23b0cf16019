use super::prelude::*;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// Get a book by ID, or null if it does not exist
    async fn get_book(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Book>> {
        validate_id(id).into_gql()?;
        let db = ctx.data_unchecked::<Database>();

        let record = db.books().get_by_id(id).await.into_gql()?;
        Ok(record.map(Book::from))
    }

    /// Get one page of books in ascending id order
    ///
    /// Pass the id of the last book seen as `cursor` to fetch the next page.
    async fn get_books(&self, ctx: &Context<'_>, cursor: Option<i64>) -> Result<Vec<Book>> {
        let page_size = *ctx.data_unchecked::<PageSize>();
        let page = parse_pagination_args(cursor, page_size).into_gql()?;
        let db = ctx.data_unchecked::<Database>();

        let records = db
            .books()
            .list_page(page.after, page.limit)
            .await
            .into_gql()?;
        Ok(records.into_iter().map(Book::from).collect())
    }
}
