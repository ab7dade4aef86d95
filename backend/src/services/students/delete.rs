use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::{error, info};
use rusqlite::params;

/// Actix web handler for `DELETE /api/students/{id}`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> impl Responder {
    match delete_student(&db, &id) {
        Ok(()) => {
            info!("Deleted student {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            error!("Failed to delete student {}: {}", id, e);
            e.error_response()
        }
    }
}

fn delete_student(db: &Database, id: &str) -> AppResult<()> {
    let conn = db.connect()?;
    let deleted = conn.execute("DELETE FROM students WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(AppError::NotFound("Student"));
    }
    Ok(())
}
