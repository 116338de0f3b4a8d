use super::model::{NewShow, ShowListQuery, ShowPatch};
use crate::error::StoreResult;
use crate::sql::Sql;
use crate::update::UpdateSet;

/// `show` is a reserved word, so the table is always quoted.
const TABLE: &str = "\"show\"";

pub(crate) fn insert(show: NewShow) -> Sql {
    let mut q = Sql::new(format!(
        "INSERT INTO {TABLE} (movies_id, cinemas_id, showdate, showtime, prices) VALUES ("
    ));
    q.push_bind(show.movies_id)
        .push(", ")
        .push_bind(show.cinemas_id)
        .push(", ")
        .push_bind(show.showdate)
        .push(", ")
        .push_bind(show.showtime)
        .push(", ")
        .push_bind(show.prices)
        .push(") RETURNING *");
    q.tagged("shows.create")
}

pub(crate) fn get_one(id: i64) -> Sql {
    let mut q = Sql::new(
        "SELECT s.id, m.title, s.showdate, s.showtime, s.prices, c.address, \
         c2.name AS brand_name, c3.name AS city_name \
         FROM \"show\" s \
         LEFT JOIN cinemas c ON s.cinemas_id = c.id \
         LEFT JOIN cinemasbrand c2 ON c.cinemas_brand_id = c2.id \
         LEFT JOIN movies m ON s.movies_id = m.id \
         LEFT JOIN city c3 ON c.city_id = c3.id \
         WHERE s.id = ",
    );
    q.push_bind(id);
    q.tagged("shows.get_one")
}

pub(crate) fn list(query: &ShowListQuery) -> Sql {
    let mut q = Sql::new(format!("SELECT * FROM {TABLE}"));
    if let Some(date) = query.showdate {
        q.push(" WHERE showdate = ").push_bind(date);
    }
    q.tagged("shows.list")
}

pub(crate) fn update(patch: ShowPatch, id: i64) -> StoreResult<Sql> {
    let mut set = UpdateSet::new(TABLE);
    set.set_opt("movies_id", patch.movies_id)
        .set_opt("cinemas_id", patch.cinemas_id)
        .set_opt("showdate", patch.showdate)
        .set_opt("showtime", patch.showtime)
        .set_opt("prices", patch.prices);
    Ok(set.into_update_by_id(id)?.tagged("shows.update"))
}

pub(crate) fn delete(id: i64) -> Sql {
    let mut q = Sql::new(format!("DELETE FROM {TABLE} WHERE id = "));
    q.push_bind(id);
    q.tagged("shows.delete")
}
