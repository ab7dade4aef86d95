use crate::database::{courses, leads, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use crate::services::leads::list::join_courses;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::lead::LeadRecord;
use log::error;

/// Actix web handler for `GET /api/leads/{lead_id}`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    lead_id: web::Path<String>,
) -> impl Responder {
    match get_lead(&db, &lead_id) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => {
            error!("Error retrieving lead {}: {}", lead_id, e);
            e.error_response()
        }
    }
}

fn get_lead(db: &Database, lead_id: &str) -> AppResult<LeadRecord> {
    let conn = db.connect()?;
    let lead = leads::find(&conn, lead_id)?.ok_or(AppError::NotFound("Lead"))?;
    let all_courses = courses::fetch_all(&conn)?;
    join_courses(vec![lead], &all_courses)
        .pop()
        .ok_or(AppError::NotFound("Lead"))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{seed_course, seed_lead, TestContext};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::lead::LeadRecord;

    #[actix_web::test]
    async fn returns_the_lead_with_its_course_name() {
        let ctx = TestContext::new();
        let course = seed_course(&ctx.db, "Rust", 300.0);
        let lead = seed_lead(&ctx.db, "Grace Hopper", Some(&course.id));
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/leads/{}", lead.id))
            .insert_header(ctx.bearer())
            .to_request();
        let record: LeadRecord = test::call_and_read_body_json(&app, req).await;
        assert_eq!(record.lead, lead);
        assert_eq!(record.interested_course_name.as_deref(), Some("Rust"));
    }

    #[actix_web::test]
    async fn unknown_lead_is_not_found() {
        let ctx = TestContext::new();
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::get()
            .uri("/api/leads/missing")
            .insert_header(ctx.bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
