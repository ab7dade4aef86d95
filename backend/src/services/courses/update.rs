use crate::database::{courses, students, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use crate::services::courses::create::normalize;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::course::{Course, CourseInput};
use log::{error, info};
use rusqlite::params;

/// Actix web handler for `PUT /api/courses/{course_id}`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    course_id: web::Path<String>,
    payload: web::Json<CourseInput>,
) -> impl Responder {
    match update_course(&db, &course_id, &payload) {
        Ok(course) => {
            info!("Updated course {}", course.id);
            HttpResponse::Ok().json(course)
        }
        Err(e) => {
            error!("Failed to update course {}: {}", course_id, e);
            e.error_response()
        }
    }
}

/// Lowering the fee below what an enrolled student already paid is refused.
fn update_course(db: &Database, course_id: &str, input: &CourseInput) -> AppResult<Course> {
    let input = normalize(input)?;
    let conn = db.connect()?;
    let existing = courses::find(&conn, course_id)?.ok_or(AppError::NotFound("Course"))?;

    if input.fee < existing.fee {
        let overpaid = students::fetch_all(&conn)?
            .into_iter()
            .filter(|s| s.course_id == course_id)
            .find(|s| s.fees_paid > input.fee);
        if let Some(student) = overpaid {
            return Err(AppError::conflict(format!(
                "Student {} has already paid {:.2}, more than the new fee",
                student.student_id, student.fees_paid
            )));
        }
    }

    conn.execute(
        "UPDATE courses SET name = ?1, description = ?2, fee = ?3, duration = ?4, level = ?5,
                            status = ?6
         WHERE id = ?7",
        params![
            input.name,
            input.description,
            input.fee,
            input.duration,
            input.level.as_str(),
            input.status.as_str(),
            course_id,
        ],
    )?;

    Ok(Course {
        id: existing.id,
        name: input.name,
        description: input.description,
        fee: input.fee,
        duration: input.duration,
        level: input.level,
        status: input.status,
        created_at: existing.created_at,
    })
}
