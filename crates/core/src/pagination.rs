//! Page-number pagination for list endpoints.
//!
//! Lists are served in fixed pages of [`PAGE_SIZE`] rows selected by a
//! 1-based `?page=` parameter. An empty table still has one (empty) first
//! page; any other number outside `1..=num_pages` is rejected.

use serde::Serialize;

use crate::error::CoreError;

/// Rows per page on every list endpoint.
pub const PAGE_SIZE: i64 = 5;

/// Keyword accepted in place of a number to select the final page.
const LAST_PAGE: &str = "last";

/// A resolved page within a result set of `count` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Page {
    /// Resolve the raw `?page=` value against a row count.
    ///
    /// `None` selects page 1. Accepts a positive integer or `"last"`.
    pub fn resolve(requested: Option<&str>, count: i64) -> Result<Self, CoreError> {
        let num_pages = num_pages(count);

        let number = match requested.map(str::trim) {
            None | Some("") => 1,
            Some(LAST_PAGE) => num_pages,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| CoreError::InvalidPage("That page number is not an integer".into()))?,
        };

        if number < 1 {
            return Err(CoreError::InvalidPage(
                "That page number is less than 1".into(),
            ));
        }
        if number > num_pages {
            return Err(CoreError::InvalidPage("That page contains no results".into()));
        }

        Ok(Self {
            number,
            num_pages,
            count,
            has_next: number < num_pages,
            has_previous: number > 1,
        })
    }

    /// SQL `OFFSET` for this page.
    pub fn offset(&self) -> i64 {
        (self.number - 1) * PAGE_SIZE
    }

    /// SQL `LIMIT` for this page.
    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }
}

fn num_pages(count: i64) -> i64 {
    if count <= 0 {
        1
    } else {
        (count + PAGE_SIZE - 1) / PAGE_SIZE
    }
}
