//! Table definitions and idempotent schema creation
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS`, so applying the
//! schema on every start is safe. Column changes are not migrated.

use sqlx::SqlitePool;
use tracing::debug;

/// Table name and its DDL, in dependency order
const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "books",
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            published_year INTEGER NOT NULL CHECK (published_year >= 0)
        )
        "#,
    ),
    (
        "reviews",
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL REFERENCES books(id) ON DELETE CASCADE,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            comment TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_reviews_book_id ON reviews(book_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_user_id ON reviews(user_id)",
];

/// Result of applying the schema
#[derive(Debug, Default)]
pub struct SchemaResult {
    pub tables_created: Vec<String>,
}

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}

/// Tables the application needs that are absent from the database
pub async fn missing_tables(pool: &SqlitePool) -> Result<Vec<&'static str>, sqlx::Error> {
    let mut missing = Vec::new();
    for (table, _) in TABLES {
        if !table_exists(pool, table).await? {
            missing.push(*table);
        }
    }
    Ok(missing)
}

/// Create all tables and indexes that do not exist yet
pub async fn apply(pool: &SqlitePool) -> Result<SchemaResult, sqlx::Error> {
    let mut result = SchemaResult::default();

    for (table, ddl) in TABLES {
        if table_exists(pool, table).await? {
            continue;
        }
        debug!(table = %table, "Creating table");
        sqlx::query(ddl).execute(pool).await?;
        result.tables_created.push(table.to_string());
    }

    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn test_apply_is_idempotent() {
        let db = Database::in_memory().await;
        let again = apply(db.pool()).await.unwrap();
        assert!(again.tables_created.is_empty());
        for (table, _) in TABLES {
            assert!(table_exists(db.pool(), table).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_missing_tables() {
        let db = Database::in_memory().await;
        assert!(missing_tables(db.pool()).await.unwrap().is_empty());

        sqlx::query("DROP TABLE reviews").execute(db.pool()).await.unwrap();
        assert_eq!(missing_tables(db.pool()).await.unwrap(), vec!["reviews"]);

        apply(db.pool()).await.unwrap();
        assert!(missing_tables(db.pool()).await.unwrap().is_empty());
    }
}
