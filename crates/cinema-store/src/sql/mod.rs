//! Dynamic SQL builder.
//!
//! Every statement the repositories issue is composed with [`Sql`]: fixed SQL
//! text goes through `push`, caller-supplied values through `push_bind`, and
//! `$1, $2, ...` placeholders are numbered when the statement is rendered.
//!
//! # Example
//!
//! ```ignore
//! use cinema_store::sql;
//!
//! let mut q = sql("SELECT * FROM \"show\"");
//! if let Some(date) = showdate {
//!     q.push(" WHERE showdate = ").push_bind(date);
//! }
//!
//! let shows: Vec<Show> = q.fetch_all_as(&conn).await?;
//! ```

mod builder;


pub use builder::Sql;

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}
