use crate::error::StoreResult;
use crate::row::{FromRow, RowExt};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// A row of `movies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub director: Option<String>,
    pub casts: Option<String>,
    pub synopsis: Option<String>,
    pub seller_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Movie {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            image: row.try_get_column("image")?,
            category: row.try_get_column("category")?,
            release_date: row.try_get_column("release_date")?,
            duration: row.try_get_column("duration")?,
            director: row.try_get_column("director")?,
            casts: row.try_get_column("casts")?,
            synopsis: row.try_get_column("synopsis")?,
            seller_id: row.try_get_column("seller_id")?,
            created_at: row.try_get_column("created_at")?,
        })
    }
}

/// Input for [`super::MovieRepo::create`]. `id` and `created_at` are assigned
/// by the database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub casts: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub seller_id: Option<i64>,
}

/// Partial update for a movie; `None` leaves the column untouched.
///
/// Older clients send the title as `name`; both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoviePatch {
    #[serde(alias = "name")]
    pub title: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<i32>,
    pub director: Option<String>,
    pub casts: Option<String>,
    pub synopsis: Option<String>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.image.is_none()
            && self.category.is_none()
            && self.release_date.is_none()
            && self.duration.is_none()
            && self.director.is_none()
            && self.casts.is_none()
            && self.synopsis.is_none()
    }
}

/// One line of the catalogue listing: a movie joined with a venue and one of
/// its screening times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieListing {
    pub title: String,
    pub movies_image: Option<String>,
    pub synopsis: Option<String>,
    pub duration: i32,
    pub release_date: NaiveDate,
    pub director: Option<String>,
    pub casts: Option<String>,
    pub seller_id: Option<i64>,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub cinema_name: Option<String>,
    pub cinema_image: Option<String>,
}

impl FromRow for MovieListing {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            title: row.try_get_column("title")?,
            movies_image: row.try_get_column("movies_image")?,
            synopsis: row.try_get_column("synopsis")?,
            duration: row.try_get_column("duration")?,
            release_date: row.try_get_column("release_date")?,
            director: row.try_get_column("director")?,
            casts: row.try_get_column("casts")?,
            seller_id: row.try_get_column("seller_id")?,
            show_date: row.try_get_column("show_date")?,
            show_time: row.try_get_column("show_time")?,
            cinema_name: row.try_get_column("cinema_name")?,
            cinema_image: row.try_get_column("cinema_image")?,
        })
    }
}
