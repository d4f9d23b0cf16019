//! Books repository

use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_year: i32,
}

#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub published_year: i32,
}

pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a book by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<BookRecord>, sqlx::Error> {
        sqlx::query_as::<_, BookRecord>(
            "SELECT id, title, author, published_year FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// List books in ascending id order, starting strictly after `after`
    pub async fn list_page(
        &self,
        after: Option<i64>,
        limit: i64,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, title, author, published_year FROM books");
        if let Some(after) = after {
            qb.push(" WHERE id > ").push_bind(after);
        }
        qb.push(" ORDER BY id ASC LIMIT ").push_bind(limit);

        qb.build_query_as::<BookRecord>().fetch_all(&self.pool).await
    }

    /// Create a new book
    pub async fn create(&self, book: CreateBook) -> Result<BookRecord, sqlx::Error> {
        sqlx::query_as::<_, BookRecord>(
            r#"
            INSERT INTO books (title, author, published_year)
            VALUES (?, ?, ?)
            RETURNING id, title, author, published_year
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.published_year)
        .fetch_one(&self.pool)
        .await
    }

    /// Count all books
    #[cfg(test)]
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn seed_books(db: &Database, n: usize) -> Vec<BookRecord> {
        let mut out = Vec::new();
        for i in 0..n {
            out.push(
                db.books()
                    .create(CreateBook {
                        title: format!("Book {i}"),
                        author: "Some Author".to_string(),
                        published_year: 1900 + i as i32,
                    })
                    .await
                    .unwrap(),
            );
        }
        out
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = Database::in_memory().await;
        let created = seed_books(&db, 1).await.remove(0);
        let fetched = db.books().get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(db.books().get_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_page_cursor() {
        let db = Database::in_memory().await;
        let books = seed_books(&db, 5).await;
        let repo = db.books();

        let first = repo.list_page(None, 3).await.unwrap();
        assert_eq!(first, books[..3].to_vec());

        let second = repo.list_page(Some(first[2].id), 3).await.unwrap();
        assert_eq!(second, books[3..].to_vec());

        let empty = repo.list_page(Some(books[4].id), 3).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_negative_year_rejected_by_constraint() {
        let db = Database::in_memory().await;
        let result = db
            .books()
            .create(CreateBook {
                title: "Bad".to_string(),
                author: "Author".to_string(),
                published_year: -5,
            })
            .await;
        assert!(result.is_err());
    }
}
