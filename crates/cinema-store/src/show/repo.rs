use super::model::{NewShow, Show, ShowDetail, ShowListQuery, ShowPatch};
use super::statements;
use crate::client::GenericClient;
use crate::error::StoreResult;

/// Data access for screenings.
pub struct ShowRepo<C> {
    client: C,
}

impl<C: GenericClient> ShowRepo<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn create(&self, show: NewShow) -> StoreResult<Show> {
        statements::insert(show).fetch_one_as(&self.client).await
    }

    /// The show with its movie, venue, brand and city; `Ok(None)` if absent.
    pub async fn get_one(&self, id: i64) -> StoreResult<Option<ShowDetail>> {
        statements::get_one(id).fetch_opt_as(&self.client).await
    }

    pub async fn list(&self, query: &ShowListQuery) -> StoreResult<Vec<Show>> {
        statements::list(query).fetch_all_as(&self.client).await
    }

    pub async fn update(&self, patch: ShowPatch, id: i64) -> StoreResult<Option<Show>> {
        statements::update(patch, id)?
            .fetch_opt_as(&self.client)
            .await
    }

    pub async fn delete(&self, id: i64) -> StoreResult<u64> {
        statements::delete(id).execute(&self.client).await
    }
}
