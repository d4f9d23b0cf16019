//! Cursor-based pagination for list queries
//!
//! A cursor is the id of the last item the client has seen. Pages are
//! ordered by ascending id and start strictly after the cursor.

use crate::validation::{ValidationError, validate_id};

/// Number of items per page, stored in the schema data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(pub i64);

impl Default for PageSize {
    fn default() -> Self {
        Self(3)
    }
}

/// A resolved page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Return items with an id strictly greater than this
    pub after: Option<i64>,
    /// Maximum number of items to return
    pub limit: i64,
}

/// Parse pagination arguments into a page request
pub fn parse_pagination_args(
    cursor: Option<i64>,
    page_size: PageSize,
) -> Result<PageRequest, ValidationError> {
    if let Some(cursor) = cursor {
        validate_id(cursor)?;
    }

    Ok(PageRequest {
        after: cursor,
        limit: page_size.0.max(1),
    })
}
