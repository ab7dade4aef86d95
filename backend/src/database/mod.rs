//! SQLite access shared by every service.
//!
//! `Database` only remembers where the file lives; each operation opens its own
//! connection through [`Database::connect`], which also turns on foreign key
//! enforcement. The read helpers in the sub-modules fetch whole collections,
//! which the services then filter, join and aggregate in memory.

pub mod courses;
pub mod lead_imports;
pub mod leads;
mod schema;
pub mod students;

use log::info;
use rusqlite::types::Type;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Database {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Opens a new connection with foreign keys enforced.
    pub fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Creates any missing tables. Safe to run on every startup.
    pub fn init(&self) -> rusqlite::Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(schema::SCHEMA)?;
        info!("Database ready at {}", self.path.display());
        Ok(())
    }
}

/// Reads a text column holding one of the model's enum strings.
pub(crate) fn enum_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
