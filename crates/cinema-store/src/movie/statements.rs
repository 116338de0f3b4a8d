//! SQL for the `movies` table. Every caller-supplied value is bound.

use super::model::{MoviePatch, NewMovie};
use super::query::{MovieQuery, ShowFilter};
use crate::error::StoreResult;
use crate::sql::Sql;
use crate::update::UpdateSet;

const LISTING_COLUMNS: &str = "m.title, m.image AS movies_image, m.synopsis, m.duration, \
     m.release_date, m.director, m.casts, m.seller_id, t.show_date, t.show_time, \
     c.name AS cinema_name, c.image AS cinema_image";

const LISTING_SOURCE: &str =
    " FROM movies m JOIN cinemas c ON c.movies_id = m.id JOIN \"time\" t ON t.cinemas_id = c.id";

pub(crate) fn insert(movie: NewMovie) -> Sql {
    let mut q = Sql::new(
        "INSERT INTO movies (title, image, category, release_date, duration, director, casts, \
         synopsis, seller_id, created_at) VALUES (",
    );
    q.push_bind(movie.title)
        .push(", ")
        .push_bind(movie.image)
        .push(", ")
        .push_bind(movie.category)
        .push(", ")
        .push_bind(movie.release_date)
        .push(", ")
        .push_bind(movie.duration)
        .push(", ")
        .push_bind(movie.director)
        .push(", ")
        .push_bind(movie.casts)
        .push(", ")
        .push_bind(movie.synopsis)
        .push(", ")
        .push_bind(movie.seller_id)
        .push(", now()) RETURNING *");
    q.tagged("movies.create")
}

fn push_show_filter(q: &mut Sql, show: Option<ShowFilter>) {
    match show {
        None => {}
        Some(ShowFilter::Now) => {
            q.push(" WHERE t.show_date <= now()");
        }
        Some(ShowFilter::Month { year, month }) => {
            q.push(" WHERE date_part('month', t.show_date)::int = ")
                .push_bind(month)
                .push(" AND date_part('year', t.show_date)::int = ")
                .push_bind(year);
        }
    }
}

/// Catalogue page: filter, sort, then `LIMIT`/`OFFSET`.
pub(crate) fn list(query: &MovieQuery) -> StoreResult<Sql> {
    query.validate()?;

    let mut q = Sql::new(format!("SELECT {LISTING_COLUMNS}{LISTING_SOURCE}"));
    push_show_filter(&mut q, query.show);
    q.push(query.sort.unwrap_or_default().order_by_sql());
    q.page(query.page, query.limit)?;
    Ok(q.tagged("movies.list"))
}

/// Row count under the same filter as [`list`]; binds only the filter values.
pub(crate) fn count(query: &MovieQuery) -> Sql {
    let mut q = Sql::new(format!("SELECT count(*) AS total_movies{LISTING_SOURCE}"));
    push_show_filter(&mut q, query.show);
    q.tagged("movies.meta")
}

pub(crate) fn get_one(id: i64) -> Sql {
    let mut q = Sql::new("SELECT * FROM movies WHERE id = ");
    q.push_bind(id);
    q.tagged("movies.get_one")
}

pub(crate) fn showing() -> Sql {
    Sql::new("SELECT * FROM movies WHERE release_date <= now()").tagged("movies.showing")
}

pub(crate) fn update(patch: MoviePatch, id: i64) -> StoreResult<Sql> {
    let mut set = UpdateSet::new("movies");
    set.set_opt("title", patch.title)
        .set_opt("image", patch.image)
        .set_opt("category", patch.category)
        .set_opt("release_date", patch.release_date)
        .set_opt("duration", patch.duration)
        .set_opt("director", patch.director)
        .set_opt("casts", patch.casts)
        .set_opt("synopsis", patch.synopsis);
    Ok(set.into_update_by_id(id)?.tagged("movies.update"))
}

pub(crate) fn delete(id: i64) -> Sql {
    let mut q = Sql::new("DELETE FROM movies WHERE id = ");
    q.push_bind(id);
    q.tagged("movies.delete")
}
