use crate::database::{courses, students, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use crate::services::students::validate::validate_student;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::student::{Student, StudentInput};
use log::{error, info, warn};
use rusqlite::params;

/// Actix web handler for `PUT /api/students/{id}`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    id: web::Path<String>,
    payload: web::Json<StudentInput>,
) -> impl Responder {
    match update_student(&db, &id, &payload) {
        Ok(student) => {
            info!("Updated student {}", student.student_id);
            HttpResponse::Ok().json(student)
        }
        Err(e @ (AppError::Validation(_) | AppError::Conflict(_))) => {
            warn!("Rejected update of student {}: {}", id, e);
            e.error_response()
        }
        Err(e) => {
            error!("Failed to update student {}: {}", id, e);
            e.error_response()
        }
    }
}

fn update_student(db: &Database, id: &str, input: &StudentInput) -> AppResult<Student> {
    let conn = db.connect()?;
    let current = students::find(&conn, id)?.ok_or(AppError::NotFound("Student"))?;
    let existing = students::fetch_all(&conn)?;
    let all_courses = courses::fetch_all(&conn)?;
    let input = validate_student(input, &existing, &all_courses, Some(id))?;

    conn.execute(
        "UPDATE students SET student_id = ?1, name = ?2, email = ?3, phone = ?4, course_id = ?5,
                             fees_paid = ?6, status = ?7, enrollment_date = ?8
         WHERE id = ?9",
        params![
            input.student_id,
            input.name,
            input.email,
            input.phone,
            input.course_id,
            input.fees_paid,
            input.status.as_str(),
            input.enrollment_date,
            id,
        ],
    )
    .map_err(|e| AppError::from_unique(e, format!("Student ID {} already exists", input.student_id)))?;

    Ok(Student {
        id: current.id,
        student_id: input.student_id,
        name: input.name,
        email: input.email,
        phone: input.phone,
        course_id: input.course_id,
        fees_paid: input.fees_paid,
        status: input.status,
        enrollment_date: input.enrollment_date,
        created_at: current.created_at,
    })
}
