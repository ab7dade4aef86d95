use crate::database::{courses, new_id, students, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use crate::services::students::validate::validate_student;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::model::student::{Student, StudentInput};
use log::{error, info, warn};
use rusqlite::Connection;

/// Actix web handler for `POST /api/students`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    payload: web::Json<StudentInput>,
) -> impl Responder {
    let result = db
        .connect()
        .map_err(AppError::from)
        .and_then(|conn| create_student(&conn, &payload));

    match result {
        Ok(student) => {
            info!("Added student {} ({})", student.student_id, student.id);
            HttpResponse::Created().json(student)
        }
        Err(e @ (AppError::Validation(_) | AppError::Conflict(_))) => {
            warn!("Rejected student {}: {}", payload.student_id, e);
            e.error_response()
        }
        Err(e) => {
            error!("Failed to add student: {}", e);
            e.error_response()
        }
    }
}

/// Validates against the current students and courses, then inserts.
///
/// Takes a connection rather than the `Database` so lead conversion can run it
/// inside its transaction.
pub fn create_student(conn: &Connection, input: &StudentInput) -> AppResult<Student> {
    let existing = students::fetch_all(conn)?;
    let all_courses = courses::fetch_all(conn)?;
    let input = validate_student(input, &existing, &all_courses, None)?;

    let student = Student {
        id: new_id(),
        student_id: input.student_id,
        name: input.name,
        email: input.email,
        phone: input.phone,
        course_id: input.course_id,
        fees_paid: input.fees_paid,
        status: input.status,
        enrollment_date: input.enrollment_date,
        created_at: Utc::now(),
    };

    students::insert(conn, &student).map_err(|e| {
        AppError::from_unique(e, format!("Student ID {} already exists", student.student_id))
    })?;
    Ok(student)
}

#[cfg(test)]
mod tests {
    use crate::database::students;
    use crate::test_support::{seed_course, seed_student, student_input, TestContext};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::student::Student;

    #[actix_web::test]
    async fn creates_a_student() {
        let ctx = TestContext::new();
        let course = seed_course(&ctx.db, "Rust", 300.0);
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/students")
            .insert_header(ctx.bearer())
            .set_json(student_input("STU100", &course.id, 120.0))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let student: Student = test::read_body_json(resp).await;
        assert_eq!(student.student_id, "STU100");
        assert_eq!(student.course_id, course.id);
    }

    #[actix_web::test]
    async fn duplicate_student_id_is_rejected_before_any_write() {
        let ctx = TestContext::new();
        let course = seed_course(&ctx.db, "Rust", 300.0);
        seed_student(&ctx.db, "STU100", &course.id, 0.0);
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/students")
            .insert_header(ctx.bearer())
            .set_json(student_input("STU100", &course.id, 10.0))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let conn = ctx.db.connect().unwrap();
        assert_eq!(students::fetch_all(&conn).unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn overpayment_is_a_bad_request() {
        let ctx = TestContext::new();
        let course = seed_course(&ctx.db, "Rust", 300.0);
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/api/students")
            .insert_header(ctx.bearer())
            .set_json(student_input("STU100", &course.id, 301.0))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unique_constraint_backs_the_scan() {
        let ctx = TestContext::new();
        let course = seed_course(&ctx.db, "Rust", 300.0);
        let first = seed_student(&ctx.db, "STU100", &course.id, 0.0);

        let mut clone = first.clone();
        clone.id = "another-record".to_string();
        clone.student_id = "stu100".to_string();
        let conn = ctx.db.connect().unwrap();
        let err = students::insert(&conn, &clone).unwrap_err();
        let mapped = crate::error::AppError::from_unique(err, "dup");
        assert!(matches!(mapped, crate::error::AppError::Conflict(_)));
    }
}
