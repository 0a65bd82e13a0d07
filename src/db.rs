//! Synchronous execution layer over [`rusqlite`].

use rusqlite::{Connection, params_from_iter};
use tracing::debug;

use crate::error::{Error, Result};
use crate::row::FromRow;
use crate::sql::ToSql;

/// A database handle wrapping a [`rusqlite::Connection`].
///
/// Single-threaded, synchronous request/response. Driver errors surface
/// unchanged as [`Error::Sqlite`].
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Runs a statement and returns the number of affected rows.
    pub fn execute(&self, statement: impl ToSql) -> Result<usize> {
        let sql = statement.to_sql();
        let text = sql.sql();
        debug!(sql = %text, "execute");
        Ok(self.conn.execute(&text, params_from_iter(sql.params()))?)
    }

    /// Runs several semicolon-separated statements, without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        debug!(statements = sql.matches(';').count(), "execute batch");
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Runs a query and returns all matching rows.
    pub fn all<R: FromRow>(&self, query: impl ToSql) -> Result<Vec<R>> {
        let sql = query.to_sql();
        let text = sql.sql();
        debug!(sql = %text, params = sql.params().len(), "query");
        let mut stmt = self.conn.prepare(&text)?;
        let mut rows = stmt.query(params_from_iter(sql.params()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(R::from_row(row)?);
        }
        Ok(out)
    }

    /// Runs a query and returns the first row, or [`Error::NotFound`].
    pub fn get<R: FromRow>(&self, query: impl ToSql) -> Result<R> {
        let sql = query.to_sql();
        let text = sql.sql();
        debug!(sql = %text, params = sql.params().len(), "query one");
        let mut stmt = self.conn.prepare(&text)?;
        let mut rows = stmt.query(params_from_iter(sql.params()))?;
        match rows.next()? {
            Some(row) => R::from_row(row),
            None => Err(Error::NotFound),
        }
    }
}
