//! Demo data for a fresh database.
//!
//! Each table is seeded only while it is empty, so re-runs are no-ops.
//! Reviews are seeded only when the users and books they point at were
//! seeded in the same run.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::{CreateBook, CreateReview, CreateUser, Database};

/// Plaintext password of every demo user
pub const DEMO_PASSWORD: &str = "secret123";

const USERS: &[(&str, &str)] = &[
    ("johndoe1", "johndoe1@example.com"),
    ("johndoe2", "johndoe2@example.com"),
    ("johndoe3", "johndoe3@example.com"),
];

const BOOKS: &[(&str, &str, i32)] = &[
    ("The Hobbit", "J.R.R. Tolkien", 1937),
    ("The Catcher in the Rye", "J.D. Salinger", 1951),
    ("To Kill a Mockingbird", "Harper Lee", 1960),
    ("1984", "George Orwell", 1949),
    ("Pride and Prejudice", "Jane Austen", 1813),
    ("The Great Gatsby", "F. Scott Fitzgerald", 1925),
    ("The Grapes of Wrath", "John Steinbeck", 1939),
    ("The Alchemist", "Paulo Coelho", 1988),
    ("The Lord of the Rings", "J.R.R. Tolkien", 1954),
    ("Treasure Island", "Robert Louis Stevenson", 1883),
    ("Animal Farm", "George Orwell", 1945),
    ("The Picture of Dorian Gray", "Oscar Wilde", 1890),
];

/// Result of running seed operations.
#[derive(Debug, Default)]
pub struct SeedResult {
    pub tables_seeded: Vec<String>,
    pub errors: Vec<String>,
}

async fn is_empty(pool: &SqlitePool, table: &str) -> Result<bool, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await?;
    Ok(count == 0)
}

async fn seed_users(db: &Database, password_hash: &str) -> Result<Vec<i64>, sqlx::Error> {
    if !is_empty(db.pool(), "users").await? {
        return Ok(Vec::new());
    }

    let mut ids = Vec::with_capacity(USERS.len());
    for (username, email) in USERS {
        let user = db
            .users()
            .create(CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            })
            .await?;
        ids.push(user.id);
    }
    Ok(ids)
}

async fn seed_books(db: &Database) -> Result<Vec<i64>, sqlx::Error> {
    if !is_empty(db.pool(), "books").await? {
        return Ok(Vec::new());
    }

    let mut ids = Vec::with_capacity(BOOKS.len());
    for (title, author, year) in BOOKS {
        let book = db
            .books()
            .create(CreateBook {
                title: title.to_string(),
                author: author.to_string(),
                published_year: *year,
            })
            .await?;
        ids.push(book.id);
    }
    Ok(ids)
}

/// One review per book, rotating through the users
async fn seed_reviews(db: &Database, users: &[i64], books: &[i64]) -> Result<u64, sqlx::Error> {
    if users.is_empty() || books.is_empty() || !is_empty(db.pool(), "reviews").await? {
        return Ok(0);
    }

    let mut inserted = 0;
    for (i, book_id) in books.iter().enumerate() {
        let (rating, comment) = if i % 2 == 0 {
            (5, "Great book!")
        } else {
            (4, "I really enjoyed the book")
        };
        db.reviews()
            .create(CreateReview {
                book_id: *book_id,
                user_id: users[i % users.len()],
                rating,
                comment: Some(comment.to_string()),
            })
            .await?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Run all seed routines. Safe to call multiple times.
///
/// `password_hash` is stored for every demo user; it should be the hash of
/// [`DEMO_PASSWORD`].
pub async fn run_seeds(db: &Database, password_hash: &str) -> SeedResult {
    let mut result = SeedResult::default();

    let users = match seed_users(db, password_hash).await {
        Ok(ids) => ids,
        Err(e) => {
            result.errors.push(format!("Seed users: {}", e));
            Vec::new()
        }
    };
    let books = match seed_books(db).await {
        Ok(ids) => ids,
        Err(e) => {
            result.errors.push(format!("Seed books: {}", e));
            Vec::new()
        }
    };
    let reviews = match seed_reviews(db, &users, &books).await {
        Ok(n) => n,
        Err(e) => {
            result.errors.push(format!("Seed reviews: {}", e));
            0
        }
    };

    for (table, count) in [
        ("users", users.len() as u64),
        ("books", books.len() as u64),
        ("reviews", reviews),
    ] {
        if count > 0 {
            debug!(table = table, count = count, "Seeded table");
            result.tables_seeded.push(format!("{} ({} rows)", table, count));
        }
    }

    for msg in &result.errors {
        warn!("{}", msg);
    }
    if !result.tables_seeded.is_empty() {
        info!(tables = ?result.tables_seeded, "Seed data applied");
    }

    result
}
