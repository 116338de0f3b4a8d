use crate::error::StoreResult;
use crate::row::{FromRow, RowExt};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// A row of `"show"`: one screening of a movie at a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: i64,
    pub movies_id: i64,
    pub cinemas_id: i64,
    pub showdate: NaiveDate,
    pub showtime: NaiveTime,
    pub prices: i32,
}

impl FromRow for Show {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            movies_id: row.try_get_column("movies_id")?,
            cinemas_id: row.try_get_column("cinemas_id")?,
            showdate: row.try_get_column("showdate")?,
            showtime: row.try_get_column("showtime")?,
            prices: row.try_get_column("prices")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShow {
    pub movies_id: i64,
    pub cinemas_id: i64,
    pub showdate: NaiveDate,
    pub showtime: NaiveTime,
    pub prices: i32,
}

/// Partial update for a show; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowPatch {
    pub movies_id: Option<i64>,
    pub cinemas_id: Option<i64>,
    pub showdate: Option<NaiveDate>,
    pub showtime: Option<NaiveTime>,
    pub prices: Option<i32>,
}

impl ShowPatch {
    pub fn is_empty(&self) -> bool {
        self.movies_id.is_none()
            && self.cinemas_id.is_none()
            && self.showdate.is_none()
            && self.showtime.is_none()
            && self.prices.is_none()
    }
}

/// A show with its movie title, venue address, brand and city.
///
/// Joined columns are `None` when the referenced row is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowDetail {
    pub id: i64,
    pub title: Option<String>,
    pub showdate: NaiveDate,
    pub showtime: NaiveTime,
    pub prices: i32,
    pub address: Option<String>,
    pub brand_name: Option<String>,
    pub city_name: Option<String>,
}

impl FromRow for ShowDetail {
    fn from_row(row: &Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            showdate: row.try_get_column("showdate")?,
            showtime: row.try_get_column("showtime")?,
            prices: row.try_get_column("prices")?,
            address: row.try_get_column("address")?,
            brand_name: row.try_get_column("brand_name")?,
            city_name: row.try_get_column("city_name")?,
        })
    }
}

/// Filter for [`super::ShowRepo::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShowListQuery {
    pub showdate: Option<NaiveDate>,
}

impl ShowListQuery {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            showdate: Some(date),
        }
    }
}
