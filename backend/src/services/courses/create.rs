use crate::database::{courses, new_id, Database};
use crate::error::AppResult;
use crate::services::auth::AdminSession;
use crate::services::validation;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::model::course::{Course, CourseInput};
use log::{error, info};

/// Actix web handler for `POST /api/courses`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    payload: web::Json<CourseInput>,
) -> impl Responder {
    match create_course(&db, &payload) {
        Ok(course) => {
            info!("Added course {} ({})", course.name, course.id);
            HttpResponse::Created().json(course)
        }
        Err(e) => {
            error!("Failed to add course: {}", e);
            e.error_response()
        }
    }
}

pub fn create_course(db: &Database, input: &CourseInput) -> AppResult<Course> {
    let input = normalize(input)?;
    let course = Course {
        id: new_id(),
        name: input.name,
        description: input.description,
        fee: input.fee,
        duration: input.duration,
        level: input.level,
        status: input.status,
        created_at: Utc::now(),
    };

    let conn = db.connect()?;
    courses::insert(&conn, &course)?;
    Ok(course)
}

/// Checks required fields and the fee, returning the trimmed input.
pub(super) fn normalize(input: &CourseInput) -> AppResult<CourseInput> {
    Ok(CourseInput {
        name: validation::required("Course name", &input.name)?,
        description: input.description.trim().to_string(),
        fee: validation::non_negative("Fee", input.fee)?,
        duration: validation::required("Duration", &input.duration)?,
        level: input.level,
        status: input.status,
    })
}
