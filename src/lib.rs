//! # nestql
//!
//! A small typed SQL builder with nested-result ("multiset") queries for
//! SQLite.
//!
//! A multiset query returns a correlated sub-select's rows as a per-row
//! nested ordered sequence instead of flattening them through a join: scalar
//! columns appear once per outer row, nested columns appear as an ordered
//! sequence that decodes into tuples or value objects.
//!
//! ```no_run
//! use nestql::prelude::*;
//! use nestql::sakila::{ACTOR, FILM, FILM_ACTOR};
//!
//! # fn main() -> nestql::Result<()> {
//! let db = Db::open_in_memory()?;
//! nestql::sakila::create_schema(&db)?;
//! nestql::sakila::seed(&db)?;
//!
//! let films: Vec<(String, Json<Vec<(String, String)>>)> = db.all(
//!     select((
//!         FILM.title,
//!         multiset(
//!             select((ACTOR.first_name, ACTOR.last_name))
//!                 .from(&FILM_ACTOR)
//!                 .join(&ACTOR, eq(FILM_ACTOR.actor_id, ACTOR.actor_id))
//!                 .r#where(eq(FILM_ACTOR.film_id, FILM.film_id)),
//!         )
//!         .alias("actors"),
//!     ))
//!     .from(&FILM)
//!     .order_by([asc(FILM.title)]),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod error;
pub mod expr;
pub mod insert;
pub mod multiset;
pub mod row;
pub mod sakila;
pub mod schema;
pub mod select;
pub mod sql;
pub mod value;

pub use error::{Error, Result};

/// Everything needed to build and run queries.
pub mod prelude {
    pub use crate::db::Db;
    pub use crate::error::{Error, Result};
    pub use crate::expr::{
        Expr, and, asc, count, count_all, desc, eq, gt, gte, like, lt, lte, max, min, neq, or,
        ordinal, sum,
    };
    pub use crate::insert::insert;
    pub use crate::multiset::{multiset, multiset_agg};
    pub use crate::row;
    pub use crate::row::{FromRow, Json};
    pub use crate::schema::Column;
    pub use crate::select::select;
    pub use crate::sql::{Sql, ToSql};
    pub use crate::value::SqlValue;
}
