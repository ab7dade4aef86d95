use crate::database::{courses, students, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use crate::services::students::list::join_courses;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::student::StudentRecord;
use log::error;

/// Actix web handler for `GET /api/students/{id}`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> impl Responder {
    match get_student(&db, &id) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => {
            error!("Error retrieving student {}: {}", id, e);
            e.error_response()
        }
    }
}

fn get_student(db: &Database, id: &str) -> AppResult<StudentRecord> {
    let conn = db.connect()?;
    let student = students::find(&conn, id)?.ok_or(AppError::NotFound("Student"))?;
    let all_courses = courses::fetch_all(&conn)?;
    join_courses(vec![student], &all_courses)
        .pop()
        .ok_or(AppError::NotFound("Student"))
}
