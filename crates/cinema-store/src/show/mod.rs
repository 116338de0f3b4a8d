//! Screenings: the `"show"` table.

mod model;
mod repo;
mod statements;


pub use model::{NewShow, Show, ShowDetail, ShowListQuery, ShowPatch};
pub use repo::ShowRepo;
