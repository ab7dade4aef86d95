use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use crate::services::students::list::load_records;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::student::StudentRecord;
use log::error;
use serde::Serialize;

/// One CSV line of the export.
#[derive(Serialize)]
struct ExportRow<'a> {
    student_id: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    course: &'a str,
    fees_paid: f64,
    fees_due: Option<f64>,
    status: &'a str,
    enrollment_date: String,
}

/// Actix web handler for `GET /api/students/export`.
pub async fn process(_admin: AdminSession, db: web::Data<Database>) -> impl Responder {
    match load_records(&db).and_then(|records| to_csv(&records)) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"students.csv\""))
            .body(body),
        Err(e) => {
            error!("Failed to export students: {}", e);
            e.error_response()
        }
    }
}

fn to_csv(records: &[StudentRecord]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        let s = &record.student;
        writer
            .serialize(ExportRow {
                student_id: &s.student_id,
                name: &s.name,
                email: &s.email,
                phone: &s.phone,
                course: record.course_name.as_deref().unwrap_or(""),
                fees_paid: s.fees_paid,
                fees_due: record.fees_due,
                status: s.status.as_str(),
                enrollment_date: s.enrollment_date.to_string(),
            })
            .map_err(|e| AppError::Internal(format!("CSV error: {}", e)))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV error: {}", e)))
}
