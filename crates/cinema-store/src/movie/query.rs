//! Listing parameters: screening filter, sort order, and paging.

use crate::error::{StoreError, StoreResult};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

/// Which screenings a listing is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFilter {
    /// Screenings dated today or earlier.
    Now,
    /// Screenings in one calendar month.
    Month { year: i32, month: i32 },
}

impl FromStr for ShowFilter {
    type Err = StoreError;

    /// Accepts `now` or `<year>-<month>` (`2024-3`, `2024-03`).
    fn from_str(s: &str) -> StoreResult<Self> {
        if s == "now" {
            return Ok(Self::Now);
        }

        let invalid = || StoreError::invalid_request(format!("invalid show filter: {s:?}"));
        let mut parts = s.split('-');
        let (Some(year), Some(month), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        let month: i32 = month.trim().parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(StoreError::invalid_request(format!(
                "show month must be 1-12, got {month}"
            )));
        }
        Ok(Self::Month { year, month })
    }
}

impl fmt::Display for ShowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Now => f.write_str("now"),
            Self::Month { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

/// Sort order for the catalogue listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovieSort {
    #[default]
    NameAsc,
    NameDesc,
    ReleaseAsc,
    ReleaseDesc,
    DurationAsc,
    DurationDesc,
}

impl MovieSort {
    /// Parse a sort key; anything unrecognised sorts by name ascending.
    pub fn parse(s: &str) -> Self {
        match s {
            "name_desc" => Self::NameDesc,
            "release_asc" => Self::ReleaseAsc,
            "release_desc" => Self::ReleaseDesc,
            "duration_asc" => Self::DurationAsc,
            "duration_desc" => Self::DurationDesc,
            _ => Self::NameAsc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::ReleaseAsc => "release_asc",
            Self::ReleaseDesc => "release_desc",
            Self::DurationAsc => "duration_asc",
            Self::DurationDesc => "duration_desc",
        }
    }

    pub(crate) fn order_by_sql(self) -> &'static str {
        match self {
            Self::NameAsc => " ORDER BY m.title ASC",
            Self::NameDesc => " ORDER BY m.title DESC",
            Self::ReleaseAsc => " ORDER BY m.release_date ASC",
            Self::ReleaseDesc => " ORDER BY m.release_date DESC",
            Self::DurationAsc => " ORDER BY m.duration ASC",
            Self::DurationDesc => " ORDER BY m.duration DESC",
        }
    }
}

impl fmt::Display for MovieSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter, sort and page for [`super::MovieRepo::list`] and
/// [`super::MovieRepo::meta`].
///
/// `sort` and `show` stay `None` when the caller did not supply them, so the
/// pagination links only echo what was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub show: Option<ShowFilter>,
    pub sort: Option<MovieSort>,
    pub limit: i64,
    pub page: i64,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            show: None,
            sort: None,
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl MovieQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(mut self, filter: ShowFilter) -> Self {
        self.show = Some(filter);
        self
    }

    pub fn sort(mut self, sort: MovieSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> StoreResult<i64> {
        self.page
            .checked_sub(1)
            .and_then(|skipped| skipped.checked_mul(self.limit))
            .ok_or_else(|| {
                StoreError::invalid_request(format!(
                    "page {} with limit {} is out of range",
                    self.page, self.limit
                ))
            })
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.limit < 1 {
            return Err(StoreError::invalid_request(format!(
                "limit must be >= 1, got {}",
                self.limit
            )));
        }
        if self.page < 1 {
            return Err(StoreError::invalid_request(format!(
                "page must be >= 1, got {}",
                self.page
            )));
        }
        self.offset()?;
        Ok(())
    }

    /// Link prefix for pagination: `/movies?` plus the supplied `sort` and
    /// `show`, each followed by `&`.
    pub fn endpoint(&self) -> String {
        let mut endpoint = String::from("/movies?");
        if let Some(sort) = self.sort {
            endpoint.push_str(&format!("sort={sort}&"));
        }
        if let Some(show) = self.show {
            endpoint.push_str(&format!("show={show}&"));
        }
        endpoint
    }
}

/// Listing parameters as they arrive in a query string; every field is
/// optional text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieListParams {
    pub show: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl TryFrom<MovieListParams> for MovieQuery {
    type Error = StoreError;

    /// Empty values count as absent.
    fn try_from(params: MovieListParams) -> StoreResult<Self> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let number = |name: &str, value: Option<String>, default: i64| -> StoreResult<i64> {
            match present(value) {
                None => Ok(default),
                Some(v) => v.trim().parse().map_err(|_| {
                    StoreError::invalid_request(format!("{name} must be a number, got {v:?}"))
                }),
            }
        };

        let query = Self {
            show: present(params.show)
                .as_deref()
                .map(str::parse::<ShowFilter>)
                .transpose()?,
            sort: present(params.sort).as_deref().map(MovieSort::parse),
            limit: number("limit", params.limit, DEFAULT_LIMIT)?,
            page: number("page", params.page, DEFAULT_PAGE)?,
        };
        query.validate()?;
        Ok(query)
    }
}
