//! Blob store contract and SQLite implementation.
//!
//! # Responsibility
//! - Read and replace whole text values by key.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - A missing key reads as `None`, never as an error.
//! - The backing connection must have migrations applied.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BlobResult<T> = Result<T, BlobError>;

/// Failure to reach or use a blob store.
#[derive(Debug)]
pub enum BlobError {
    Db(DbError),
    /// Backing storage cannot be used (poisoned lock, unmigrated schema).
    Unavailable(String),
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "blob store unavailable: {message}"),
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for BlobError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BlobError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value store holding one text blob per key.
pub trait BlobStore {
    fn get(&self, key: &str) -> BlobResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> BlobResult<()>;
}

/// SQLite-backed blob store over the `kv_blobs` table.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobStore<'conn> {
    /// Wraps a connection opened through [`crate::db::open_db`].
    ///
    /// # Errors
    /// - `Unavailable` when the schema is older than this binary expects.
    pub fn try_new(conn: &'conn Connection) -> BlobResult<Self> {
        let version = schema_version(conn)?;
        if version < latest_version() {
            return Err(BlobError::Unavailable(format!(
                "schema version {version} is older than required {}",
                latest_version()
            )));
        }
        Ok(Self { conn })
    }
}

impl BlobStore for SqliteBlobStore<'_> {
    fn get(&self, key: &str) -> BlobResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> BlobResult<()> {
        self.conn.execute(
            "INSERT INTO kv_blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
