//! Pagination metadata for list endpoints.

use serde::Serialize;

/// Totals and neighbour links for one page of a listing.
///
/// Serializes as `{"totalMovies", "totalPage", "page", "prev", "next"}`; a
/// missing link is `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_movies: i64,
    pub total_page: i64,
    pub page: i64,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl PageMeta {
    /// Compute totals and links.
    ///
    /// `endpoint` is the link prefix up to and including the trailing `&` or
    /// `?`; `limit=<limit>&page=<n>` is appended to it. Direct callers that
    /// pass a `limit` below 1 get a page size of 1; a negative `total` counts
    /// as 0.
    pub fn new(total: i64, limit: i64, page: i64, endpoint: &str) -> Self {
        let limit = limit.max(1);
        let total = total.max(0);
        let total_page = total / limit + i64::from(total % limit != 0);

        let link = |to: i64| format!("{endpoint}limit={limit}&page={to}");

        Self {
            total_movies: total,
            total_page,
            page,
            prev: (page > 1).then(|| link(page - 1)),
            next: (page < total_page).then(|| link(page + 1)),
        }
    }
}
