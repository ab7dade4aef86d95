//! Digests of lead CSV files that have already been imported.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

pub fn exists(conn: &Connection, md5: &str) -> rusqlite::Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM lead_imports WHERE md5 = ?1",
            params![md5],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Fails with a PRIMARY KEY violation when the digest is already recorded.
pub fn record(conn: &Connection, md5: &str, rows: usize) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO lead_imports (md5, rows, imported_at) VALUES (?1, ?2, ?3)",
        params![md5, rows as i64, Utc::now()],
    )?;
    Ok(())
}
