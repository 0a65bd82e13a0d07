use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Error from the underlying SQLite driver, surfaced unchanged.
    ///
    /// Row decoding failures also arrive here: a malformed multiset column
    /// fails inside the driver's column conversion.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No rows returned when exactly one was expected
    #[error("no rows found")]
    NotFound,
}

/// Result type for database operations
pub type Result<T> = std::result::Result<T, Error>;
