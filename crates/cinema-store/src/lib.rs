//! # cinema-store
//!
//! Postgres query layer for a movie-ticketing catalogue.
//!
//! ## Features
//!
//! - **Repositories**: [`MovieRepo`] and [`ShowRepo`], one SQL statement per call
//! - **Bound values only**: filters, paging and patches go through [`Sql::push_bind`]
//! - **Partial updates**: `Option` fields decide which columns are written
//! - **Pagination metadata**: [`PageMeta`] with `prev`/`next` links
//! - **Transaction-friendly**: pass a transaction anywhere a `GenericClient` is expected
//! - **Query monitoring**: [`InstrumentedClient`] logs every statement through `tracing`
//!
//! ```ignore
//! use cinema_store::{MovieQuery, MovieRepo, MovieSort, ShowFilter, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let pool = cinema_store::create_pool(&config)?;
//! let client = cinema_store::InstrumentedClient::new(pool.get().await?)
//!     .with_config(config.monitor_config());
//!
//! let movies = MovieRepo::new(&client);
//! let query = MovieQuery::new()
//!     .show(ShowFilter::Now)
//!     .sort(MovieSort::ReleaseDesc)
//!     .limit(10)
//!     .page(2);
//! let (rows, meta) = movies.list_page(&query).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod monitor;
pub mod movie;
pub mod pagination;
pub mod row;
pub mod show;
pub mod sql;
pub mod update;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(test)]
pub(crate) mod testing;

pub use client::GenericClient;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use monitor::{InstrumentedClient, MonitorConfig, QueryType};
pub use movie::{
    Movie, MovieListParams, MovieListing, MoviePatch, MovieQuery, MovieRepo, MovieSort, NewMovie,
    ShowFilter,
};
pub use pagination::PageMeta;
pub use row::{FromRow, RowExt};
pub use show::{NewShow, Show, ShowDetail, ShowListQuery, ShowPatch, ShowRepo};
pub use sql::{Sql, sql};
pub use update::UpdateSet;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_tls};
