use super::model::{Movie, MovieListing, MoviePatch, NewMovie};
use super::query::MovieQuery;
use super::statements;
use crate::client::GenericClient;
use crate::error::StoreResult;
use crate::pagination::PageMeta;
use crate::row::RowExt;

/// Data access for the movie catalogue.
///
/// Holds whatever client it was built with: a pooled connection, a
/// transaction, an [`InstrumentedClient`](crate::monitor::InstrumentedClient),
/// or a reference to any of these.
pub struct MovieRepo<C> {
    client: C,
}

impl<C: GenericClient> MovieRepo<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Insert a movie and return the stored row, including its generated `id`
    /// and `created_at`.
    pub async fn create(&self, movie: NewMovie) -> StoreResult<Movie> {
        statements::insert(movie).fetch_one_as(&self.client).await
    }

    /// One page of the catalogue joined with venues and screening times.
    pub async fn list(&self, query: &MovieQuery) -> StoreResult<Vec<MovieListing>> {
        statements::list(query)?.fetch_all_as(&self.client).await
    }

    /// Totals and prev/next links for the listing described by `query`.
    pub async fn meta(&self, query: &MovieQuery) -> StoreResult<PageMeta> {
        query.validate()?;
        let row = statements::count(query).fetch_one(&self.client).await?;
        let total: i64 = row.try_get_column("total_movies")?;
        Ok(PageMeta::new(total, query.limit, query.page, &query.endpoint()))
    }

    /// [`list`](Self::list) followed by [`meta`](Self::meta).
    pub async fn list_page(
        &self,
        query: &MovieQuery,
    ) -> StoreResult<(Vec<MovieListing>, PageMeta)> {
        let movies = self.list(query).await?;
        let meta = self.meta(query).await?;
        Ok((movies, meta))
    }

    pub async fn get_one(&self, id: i64) -> StoreResult<Option<Movie>> {
        statements::get_one(id).fetch_opt_as(&self.client).await
    }

    /// Movies released on or before today.
    pub async fn get_showing(&self) -> StoreResult<Vec<Movie>> {
        statements::showing().fetch_all_as(&self.client).await
    }

    /// Apply the fields present in `patch`; `Ok(None)` if `id` does not exist.
    pub async fn update(&self, patch: MoviePatch, id: i64) -> StoreResult<Option<Movie>> {
        statements::update(patch, id)?
            .fetch_opt_as(&self.client)
            .await
    }

    /// Number of rows removed (0 when `id` does not exist).
    pub async fn delete(&self, id: i64) -> StoreResult<u64> {
        statements::delete(id).execute(&self.client).await
    }
}
