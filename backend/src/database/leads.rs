use super::enum_column;
use common::model::lead::{Lead, LeadStatus};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT: &str = "SELECT id, name, email, phone, interested_course_id, source, status, notes, \
                      created_at FROM leads";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        interested_course_id: row.get(4)?,
        source: enum_column(row, 5)?,
        status: enum_column(row, 6)?,
        notes: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// All leads in insertion order.
pub fn fetch_all(conn: &Connection) -> rusqlite::Result<Vec<Lead>> {
    let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY rowid"))?;
    let leads = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(leads)
}

pub fn find(conn: &Connection, id: &str) -> rusqlite::Result<Option<Lead>> {
    conn.query_row(&format!("{SELECT} WHERE id = ?1"), params![id], from_row)
        .optional()
}

pub fn insert(conn: &Connection, lead: &Lead) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO leads (id, name, email, phone, interested_course_id, source, status, notes,
                            created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            lead.id,
            lead.name,
            lead.email,
            lead.phone,
            lead.interested_course_id,
            lead.source.as_str(),
            lead.status.as_str(),
            lead.notes,
            lead.created_at,
        ],
    )?;
    Ok(())
}

/// Returns the number of rows changed, 0 when the lead does not exist.
pub fn set_status(conn: &Connection, id: &str, status: LeadStatus) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE leads SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )
}
