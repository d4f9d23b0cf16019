//! Reviews repository
//!
//! Update and delete are scoped by both review id and owner id, so the
//! ownership check holds at the moment the row changes.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

/// Review record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ReviewRecord {
    pub id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateReview {
    pub book_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Changes to a review; a `None` comment keeps the stored one
#[derive(Debug, Clone)]
pub struct UpdateReview {
    pub rating: i32,
    pub comment: Option<String>,
}

const REVIEW_COLUMNS: &str = "id, book_id, user_id, rating, comment, created_at";

pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a review by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<ReviewRecord>, sqlx::Error> {
        sqlx::query_as::<_, ReviewRecord>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// List a book's reviews in ascending id order, starting strictly after `after`
    pub async fn list_for_book(
        &self,
        book_id: i64,
        after: Option<i64>,
        limit: i64,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE book_id = "
        ));
        qb.push_bind(book_id);
        if let Some(after) = after {
            qb.push(" AND id > ").push_bind(after);
        }
        qb.push(" ORDER BY id ASC LIMIT ").push_bind(limit);

        qb.build_query_as::<ReviewRecord>().fetch_all(&self.pool).await
    }

    /// List every review written by a user
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        sqlx::query_as::<_, ReviewRecord>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = ? ORDER BY id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Create a new review stamped with the current time
    pub async fn create(&self, review: CreateReview) -> Result<ReviewRecord, sqlx::Error> {
        sqlx::query_as::<_, ReviewRecord>(&format!(
            "INSERT INTO reviews (book_id, user_id, rating, comment, created_at) VALUES (?, ?, ?, ?, ?) RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(review.book_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// Update a review owned by `user_id`; `None` if no such owned review exists
    pub async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        update: UpdateReview,
    ) -> Result<Option<ReviewRecord>, sqlx::Error> {
        sqlx::query_as::<_, ReviewRecord>(&format!(
            "UPDATE reviews SET rating = ?, comment = COALESCE(?, comment) WHERE id = ? AND user_id = ? RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(update.rating)
        .bind(&update.comment)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a review owned by `user_id`; returns whether a row was removed
    pub async fn delete_owned(&self, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all reviews
    #[cfg(test)]
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
