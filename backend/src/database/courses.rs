use super::enum_column;
use common::model::course::Course;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT: &str =
    "SELECT id, name, description, fee, duration, level, status, created_at FROM courses";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        fee: row.get(3)?,
        duration: row.get(4)?,
        level: enum_column(row, 5)?,
        status: enum_column(row, 6)?,
        created_at: row.get(7)?,
    })
}

/// All courses in insertion order.
pub fn fetch_all(conn: &Connection) -> rusqlite::Result<Vec<Course>> {
    let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY rowid"))?;
    let courses = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(courses)
}

pub fn find(conn: &Connection, id: &str) -> rusqlite::Result<Option<Course>> {
    conn.query_row(&format!("{SELECT} WHERE id = ?1"), params![id], from_row)
        .optional()
}

pub fn insert(conn: &Connection, course: &Course) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO courses (id, name, description, fee, duration, level, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            course.id,
            course.name,
            course.description,
            course.fee,
            course.duration,
            course.level.as_str(),
            course.status.as_str(),
            course.created_at,
        ],
    )?;
    Ok(())
}
