//! Review mutations
//!
//! Only the author of a review may change or delete it. Ownership is checked
//! on the stored review and again by the scoped UPDATE/DELETE statement.

use super::prelude::*;

/// Load a review and check that `user_id` wrote it
async fn owned_review(db: &Database, review_id: i64, user_id: i64) -> Result<ReviewRecord, ApiError> {
    let review = db
        .reviews()
        .get_by_id(review_id)
        .await?
        .ok_or(ApiError::NotFound("Review"))?;

    if review.user_id != user_id {
        tracing::warn!(review_id, user_id, owner_id = review.user_id, "Review ownership check failed");
        return Err(ApiError::NotAuthorized);
    }
    Ok(review)
}

#[derive(Default)]
pub struct ReviewMutations;

#[Object]
impl ReviewMutations {
    /// Review a book as the current user
    #[graphql(guard = "AuthGuard")]
    async fn add_review(
        &self,
        ctx: &Context<'_>,
        book_id: i64,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review> {
        let user = ctx.auth_user()?;
        validate_new_review(book_id, rating, comment.as_deref()).into_gql()?;
        let db = ctx.data_unchecked::<Database>();

        if db.books().get_by_id(book_id).await.into_gql()?.is_none() {
            return Err(ApiError::NotFound("Book").extend());
        }

        let record = db
            .reviews()
            .create(CreateReview {
                book_id,
                user_id: user.user_id,
                rating,
                comment,
            })
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    ApiError::NotFound("Book")
                }
                other => ApiError::Database(other),
            })
            .into_gql()?;

        tracing::info!(review_id = record.id, book_id, user_id = user.user_id, "Review added");
        Ok(record.into())
    }

    /// Change the rating and optionally the comment of one of your reviews
    ///
    /// Omitting `comment` keeps the existing one.
    #[graphql(guard = "AuthGuard")]
    async fn update_review(
        &self,
        ctx: &Context<'_>,
        review_id: i64,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review> {
        let user = ctx.auth_user()?;
        validate_review_update(review_id, rating, comment.as_deref()).into_gql()?;
        let db = ctx.data_unchecked::<Database>();

        owned_review(db, review_id, user.user_id).await.into_gql()?;

        // Gone by now if a concurrent delete won
        let record = db
            .reviews()
            .update_owned(review_id, user.user_id, UpdateReview { rating, comment })
            .await
            .into_gql()?
            .ok_or(ApiError::NotFound("Review"))
            .into_gql()?;

        tracing::info!(review_id, user_id = user.user_id, "Review updated");
        Ok(record.into())
    }

    /// Delete one of your reviews
    #[graphql(guard = "AuthGuard")]
    async fn delete_review(&self, ctx: &Context<'_>, review_id: i64) -> Result<Message> {
        let user = ctx.auth_user()?;
        validate_id(review_id).into_gql()?;
        let db = ctx.data_unchecked::<Database>();

        owned_review(db, review_id, user.user_id).await.into_gql()?;

        if !db.reviews().delete_owned(review_id, user.user_id).await.into_gql()? {
            return Err(ApiError::NotFound("Review").extend());
        }

        tracing::info!(review_id, user_id = user.user_id, "Review deleted");
        Ok(Message::new("Review deleted"))
    }
}
