//! Listing query parameters.
//!
//! `GET /books` accepts two parameter styles:
//!
//! - raw `offset`/`limit` (defaults 0/10) — malformed numbers are a 400, as
//!   the endpoint has always behaved;
//! - paged `page`/`page_size`/`sort`/`order` plus the `author`/`title`
//!   filters — resolved through the pagination engine, which clamps instead
//!   of rejecting, and the response envelope gains `meta`.
//!
//! All fields deserialize as raw strings so parse failures produce the
//! enveloped errors rather than an extractor rejection.

use serde::Deserialize;

use crate::domain::pagination::PageParams;
use crate::domain::repositories::BookFilter;
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
}

impl ListBooksQuery {
    /// True when any engine-resolved parameter is present.
    pub fn is_paged(&self) -> bool {
        self.page.is_some()
            || self.page_size.is_some()
            || self.sort.is_some()
            || self.order.is_some()
            || self.author.is_some()
            || self.title.is_some()
    }

    /// Resolves the paged parameters. Non-numeric values fall through to the
    /// engine defaults — paged mode never rejects.
    pub fn page_params(&self) -> PageParams {
        let page = lenient_parse(self.page.as_deref());
        let page_size = lenient_parse(self.page_size.as_deref());

        PageParams::resolve(page, page_size, self.sort.clone(), self.order.as_deref())
    }

    pub fn filter(&self) -> BookFilter {
        BookFilter {
            author: self.author.clone().filter(|a| !a.is_empty()),
            title: self.title.clone().filter(|t| !t.is_empty()),
        }
    }

    /// Strictly parses the raw offset/limit pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for non-numeric values. Negative or
    /// zero values are clamped to the defaults rather than reaching the
    /// database.
    pub fn offset_limit(&self) -> Result<(i64, i64), AppError> {
        let offset = match self.offset.as_deref() {
            None => 0,
            Some(raw) => raw.parse::<i64>().map_err(|e| {
                AppError::bad_request("Invalid offset format", e.to_string())
            })?,
        };

        let limit = match self.limit.as_deref() {
            None => 10,
            Some(raw) => raw.parse::<i64>().map_err(|e| {
                AppError::bad_request("Invalid limit format", e.to_string())
            })?,
        };

        let offset = offset.max(0);
        let limit = if limit < 1 { 10 } else { limit };

        Ok((offset, limit))
    }
}

fn lenient_parse(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(0)
}
