//! # Lead Conversion
//!
//! `POST /api/leads/{lead_id}/convert` turns a lead into an enrolled student.
//!
//! The student is built from the lead's name, email and phone plus the
//! operator-entered student id, fees paid, enrollment date and status. The
//! course defaults to the one the lead was interested in.
//!
//! Creating the student and flipping the lead to `converted` happen in one
//! immediate transaction: either both land or neither does, and a second
//! conversion of the same lead waits for the first and then sees it converted.

use crate::database::{leads, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use crate::services::students::create::create_student;
use crate::services::validation;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::lead::LeadStatus;
use common::model::student::{Student, StudentInput};
use common::requests::ConvertLeadRequest;
use log::{error, info};
use rusqlite::TransactionBehavior;

/// Actix web handler for lead conversion. Answers `201 Created` with the student.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    lead_id: web::Path<String>,
    payload: web::Json<ConvertLeadRequest>,
) -> impl Responder {
    match convert_lead(&db, &lead_id, &payload) {
        Ok(student) => {
            info!(
                "Converted lead {} into student {}",
                lead_id, student.student_id
            );
            HttpResponse::Created().json(student)
        }
        Err(e) => {
            error!("Failed to convert lead {}: {}", lead_id, e);
            e.error_response()
        }
    }
}

pub fn convert_lead(db: &Database, lead_id: &str, req: &ConvertLeadRequest) -> AppResult<Student> {
    let mut conn = db.connect()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let lead = leads::find(&tx, lead_id)?.ok_or(AppError::NotFound("Lead"))?;
    if lead.status == LeadStatus::Converted {
        return Err(AppError::conflict("Lead is already converted"));
    }

    let course_id = validation::optional(req.course_id.as_deref())
        .or_else(|| lead.interested_course_id.clone())
        .ok_or_else(|| AppError::validation("A course is required to convert this lead"))?;

    let input = StudentInput {
        student_id: req.student_id.clone(),
        name: lead.name.clone(),
        email: lead.email.clone(),
        phone: lead.phone.clone(),
        course_id,
        fees_paid: req.fees_paid,
        status: req.status,
        enrollment_date: req.enrollment_date,
    };
    let student = create_student(&tx, &input)?;
    leads::set_status(&tx, &lead.id, LeadStatus::Converted)?;

    tx.commit()?;
    Ok(student)
}
