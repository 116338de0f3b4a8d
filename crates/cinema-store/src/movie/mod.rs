//! The movie catalogue: `movies`, listed through `cinemas` and `"time"`.

mod model;
mod query;
mod repo;
mod statements;

#[cfg(test)]
mod tests;

pub use model::{Movie, MovieListing, MoviePatch, NewMovie};
pub use query::{DEFAULT_LIMIT, DEFAULT_PAGE, MovieListParams, MovieQuery, MovieSort, ShowFilter};
pub use repo::MovieRepo;
