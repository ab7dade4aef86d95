use super::enum_column;
use common::model::student::Student;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT: &str = "SELECT id, student_id, name, email, phone, course_id, fees_paid, status, \
                      enrollment_date, created_at FROM students";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        student_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        course_id: row.get(5)?,
        fees_paid: row.get(6)?,
        status: enum_column(row, 7)?,
        enrollment_date: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// All students in insertion order.
pub fn fetch_all(conn: &Connection) -> rusqlite::Result<Vec<Student>> {
    let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY rowid"))?;
    let students = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(students)
}

pub fn find(conn: &Connection, id: &str) -> rusqlite::Result<Option<Student>> {
    conn.query_row(&format!("{SELECT} WHERE id = ?1"), params![id], from_row)
        .optional()
}

pub fn insert(conn: &Connection, student: &Student) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO students (id, student_id, name, email, phone, course_id, fees_paid, status,
                               enrollment_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            student.id,
            student.student_id,
            student.name,
            student.email,
            student.phone,
            student.course_id,
            student.fees_paid,
            student.status.as_str(),
            student.enrollment_date,
            student.created_at,
        ],
    )?;
    Ok(())
}
