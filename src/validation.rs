//! Input validation applied before anything reaches the database
//!
//! Each validator checks one input shape and reports the first violated
//! constraint as a [`ValidationError`], e.g.
//! `Book schema validation error: "publishedYear" must be greater than -1`.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum length of free-text fields, in characters
pub const MIN_TEXT_LEN: usize = 3;
/// Maximum length of free-text fields, in characters
pub const MAX_TEXT_LEN: usize = 255;
/// Smallest accepted review rating
pub const MIN_RATING: i32 = 1;
/// Largest accepted review rating
pub const MAX_RATING: i32 = 5;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("email regex is valid")
});

/// A rejected input, naming the schema, the field and the broken constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{schema} validation error: \"{field}\" {constraint}")]
pub struct ValidationError {
    pub schema: &'static str,
    pub field: &'static str,
    pub constraint: String,
}

impl ValidationError {
    fn new(schema: &'static str, field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            schema,
            field,
            constraint: constraint.into(),
        }
    }
}

type Validation = Result<(), ValidationError>;

fn check_id(schema: &'static str, field: &'static str, value: i64) -> Validation {
    if value < 0 {
        return Err(ValidationError::new(schema, field, "must be greater than -1"));
    }
    Ok(())
}

fn check_text(schema: &'static str, field: &'static str, value: &str) -> Validation {
    if value.is_empty() {
        return Err(ValidationError::new(schema, field, "is not allowed to be empty"));
    }
    let len = value.chars().count();
    if len < MIN_TEXT_LEN {
        return Err(ValidationError::new(
            schema,
            field,
            format!("length must be at least {MIN_TEXT_LEN} characters long"),
        ));
    }
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::new(
            schema,
            field,
            format!("length must be less than or equal to {MAX_TEXT_LEN} characters long"),
        ));
    }
    Ok(())
}

fn check_email(schema: &'static str, value: &str) -> Validation {
    if value.is_empty() {
        return Err(ValidationError::new(schema, "email", "is not allowed to be empty"));
    }
    if value.len() > MAX_TEXT_LEN || !EMAIL_RE.is_match(value) {
        return Err(ValidationError::new(schema, "email", "must be a valid email"));
    }
    Ok(())
}

fn check_rating(schema: &'static str, value: i32) -> Validation {
    if value < MIN_RATING {
        return Err(ValidationError::new(
            schema,
            "rating",
            format!("must be greater than {}", MIN_RATING - 1),
        ));
    }
    if value > MAX_RATING {
        return Err(ValidationError::new(
            schema,
            "rating",
            format!("must be less than {}", MAX_RATING + 1),
        ));
    }
    Ok(())
}

/// Validate a bare identifier (or pagination cursor)
pub fn validate_id(id: i64) -> Validation {
    check_id("Id", "value", id)
}

/// Validate a registration request
pub fn validate_registration(username: &str, email: &str, password: &str) -> Validation {
    const SCHEMA: &str = "User register schema";
    check_text(SCHEMA, "username", username)?;
    check_email(SCHEMA, email)?;
    check_text(SCHEMA, "password", password)
}

/// Validate login credentials
pub fn validate_credentials(email: &str, password: &str) -> Validation {
    const SCHEMA: &str = "Credentials schema";
    check_email(SCHEMA, email)?;
    check_text(SCHEMA, "password", password)
}

/// Validate a new book
pub fn validate_book(title: &str, author: &str, published_year: i32) -> Validation {
    const SCHEMA: &str = "Book schema";
    check_text(SCHEMA, "title", title)?;
    check_text(SCHEMA, "author", author)?;
    check_id(SCHEMA, "publishedYear", i64::from(published_year))
}

/// Validate a new review
pub fn validate_new_review(book_id: i64, rating: i32, comment: Option<&str>) -> Validation {
    const SCHEMA: &str = "Review schema";
    check_id(SCHEMA, "bookId", book_id)?;
    check_rating(SCHEMA, rating)?;
    match comment {
        Some(c) => check_text(SCHEMA, "comment", c),
        None => Ok(()),
    }
}

/// Validate changes to an existing review
pub fn validate_review_update(review_id: i64, rating: i32, comment: Option<&str>) -> Validation {
    const SCHEMA: &str = "Review schema";
    check_id(SCHEMA, "reviewId", review_id)?;
    check_rating(SCHEMA, rating)?;
    match comment {
        Some(c) => check_text(SCHEMA, "comment", c),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_id_rejected() {
        let err = validate_id(-1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Id validation error: \"value\" must be greater than -1"
        );
        assert!(validate_id(i64::MIN).is_err());
    }

    #[test]
    fn test_non_negative_ids_accepted() {
        for id in [0, 1, 42, i64::MAX] {
            assert!(validate_id(id).is_ok(), "id {id} should be valid");
        }
    }

    #[test]
    fn test_email_grammar() {
        for ok in ["johndoe1@example.com", "first.last+tag@sub.example.org", "a_b@x.io"] {
            assert!(validate_credentials(ok, "secret123").is_ok(), "{ok} should be valid");
        }
        for bad in ["", "plainaddress", "@example.com", "user@", "user@example", "us er@example.com", "a..b@example.com"] {
            let err = validate_credentials(bad, "secret123").unwrap_err();
            assert_eq!(err.field, "email", "{bad} should be rejected");
        }
    }

    #[test]
    fn test_text_length_bounds() {
        assert!(validate_registration("abc", "a@example.com", "abc").is_ok());
        let err = validate_registration("ab", "a@example.com", "secret").unwrap_err();
        assert_eq!(
            err.to_string(),
            "User register schema validation error: \"username\" length must be at least 3 characters long"
        );

        let long = "x".repeat(MAX_TEXT_LEN);
        assert!(validate_book(&long, "Author", 1900).is_ok());
        let too_long = "x".repeat(MAX_TEXT_LEN + 1);
        let err = validate_book(&too_long, "Author", 1900).unwrap_err();
        assert_eq!(err.field, "title");
        assert!(err.constraint.contains("less than or equal to 255"));
    }

    #[test]
    fn test_text_length_counts_characters() {
        // Three characters, nine bytes
        assert!(validate_book("日本語", "著者名", 2000).is_ok());
    }

    #[test]
    fn test_text_is_not_trimmed() {
        assert!(validate_book("   ", "Author", 2000).is_ok());
        assert!(validate_new_review(1, 4, Some("   ")).is_ok());

        let err = validate_book("", "Author", 2000).unwrap_err();
        assert_eq!(err.constraint, "is not allowed to be empty");
        let err = validate_book(" a", "Author", 2000).unwrap_err();
        assert_eq!(err.field, "title");
    }

    #[test]
    fn test_published_year() {
        assert!(validate_book("Title", "Author", 0).is_ok());
        let err = validate_book("Test Book", "Test Author", -1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Book schema validation error: \"publishedYear\" must be greater than -1"
        );
    }

    #[test]
    fn test_rating_bounds() {
        for rating in MIN_RATING..=MAX_RATING {
            assert!(validate_new_review(1, rating, None).is_ok());
        }
        let low = validate_new_review(1, 0, None).unwrap_err();
        assert_eq!(
            low.to_string(),
            "Review schema validation error: \"rating\" must be greater than 0"
        );
        let high = validate_review_update(1, 6, None).unwrap_err();
        assert_eq!(
            high.to_string(),
            "Review schema validation error: \"rating\" must be less than 6"
        );
    }

    #[test]
    fn test_review_comment_optional_but_checked() {
        assert!(validate_new_review(1, 5, None).is_ok());
        assert!(validate_new_review(1, 5, Some("Great!")).is_ok());
        let err = validate_new_review(1, 5, Some("ok")).unwrap_err();
        assert_eq!(err.field, "comment");
    }

    #[test]
    fn test_schema_prefixes() {
        let cases = [
            (validate_id(-1).unwrap_err(), "Id validation error: "),
            (
                validate_registration("ab", "a@example.com", "secret").unwrap_err(),
                "User register schema validation error: ",
            ),
            (
                validate_credentials("nope", "secret").unwrap_err(),
                "Credentials schema validation error: ",
            ),
            (
                validate_book("Title", "Author", -1).unwrap_err(),
                "Book schema validation error: ",
            ),
            (
                validate_new_review(1, 0, None).unwrap_err(),
                "Review schema validation error: ",
            ),
            (
                validate_review_update(1, 9, None).unwrap_err(),
                "Review schema validation error: ",
            ),
        ];
        for (err, prefix) in cases {
            let message = err.to_string();
            assert!(message.starts_with(prefix), "{message} should start with {prefix}");
        }
    }

    #[test]
    fn test_review_ids() {
        assert_eq!(validate_new_review(-3, 5, None).unwrap_err().field, "bookId");
        assert_eq!(validate_review_update(-3, 5, None).unwrap_err().field, "reviewId");
    }
}
