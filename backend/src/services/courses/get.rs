use crate::database::{courses, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::course::Course;
use log::error;

/// Actix web handler for `GET /api/courses/{course_id}`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    course_id: web::Path<String>,
) -> impl Responder {
    match get_course(&db, &course_id) {
        Ok(course) => HttpResponse::Ok().json(course),
        Err(e) => {
            error!("Error retrieving course {}: {}", course_id, e);
            e.error_response()
        }
    }
}

fn get_course(db: &Database, course_id: &str) -> AppResult<Course> {
    let conn = db.connect()?;
    courses::find(&conn, course_id)?.ok_or(AppError::NotFound("Course"))
}
