use crate::database::{students, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::{error, info};
use rusqlite::params;

/// Actix web handler for `DELETE /api/courses/{course_id}`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    course_id: web::Path<String>,
) -> impl Responder {
    match delete_course(&db, &course_id) {
        Ok(()) => {
            info!("Deleted course {}", course_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            error!("Failed to delete course {}: {}", course_id, e);
            e.error_response()
        }
    }
}

/// Leads interested in the course lose the reference through the foreign key.
fn delete_course(db: &Database, course_id: &str) -> AppResult<()> {
    let conn = db.connect()?;

    let enrolled = students::fetch_all(&conn)?
        .iter()
        .filter(|s| s.course_id == course_id)
        .count();
    if enrolled > 0 {
        return Err(AppError::conflict(format!(
            "Course has {} enrolled student(s)",
            enrolled
        )));
    }

    let deleted = conn.execute("DELETE FROM courses WHERE id = ?1", params![course_id])?;
    if deleted == 0 {
        return Err(AppError::NotFound("Course"));
    }
    Ok(())
}
