//! GraphQL object types

use async_graphql::{ComplexObject, Context, ErrorExtensions, Result, SimpleObject};
use chrono::{DateTime, Utc};

use crate::db::{BookRecord, Database, ReviewRecord, UserRecord};
use crate::error::ApiError;

/// Status message returned by operations without a domain result
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A registered user. The password hash is never exposed.
#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id,
            username: r.username,
            email: r.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_year: i32,
}

impl From<BookRecord> for Book {
    fn from(r: BookRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            author: r.author,
            published_year: r.published_year,
        }
    }
}

/// A user's rating of a book
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Review {
    pub id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRecord> for Review {
    fn from(r: ReviewRecord) -> Self {
        Self {
            id: r.id,
            book_id: r.book_id,
            user_id: r.user_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        }
    }
}

#[ComplexObject]
impl Review {
    /// The reviewed book
    async fn book(&self, ctx: &Context<'_>) -> Result<Book> {
        let db = ctx.data_unchecked::<Database>();
        db.books()
            .get_by_id(self.book_id)
            .await
            .map_err(|e| ApiError::from(e).extend())?
            .map(Book::from)
            .ok_or_else(|| ApiError::NotFound("Book").extend())
    }

    /// The review's author
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        let db = ctx.data_unchecked::<Database>();
        db.users()
            .get_by_id(self.user_id)
            .await
            .map_err(|e| ApiError::from(e).extend())?
            .map(User::from)
            .ok_or_else(|| ApiError::NotFound("User").extend())
    }
}
