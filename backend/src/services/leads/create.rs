use crate::database::{courses, leads, new_id, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use crate::services::validation;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::model::lead::{Lead, LeadInput, LeadStatus};
use log::{error, info, warn};
use rusqlite::Connection;

/// Actix web handler for `POST /api/leads`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    payload: web::Json<LeadInput>,
) -> impl Responder {
    let result = if payload.status == LeadStatus::Converted {
        Err(AppError::validation(
            "Leads become converted only through conversion",
        ))
    } else {
        create_lead(&db, &payload)
    };

    match result {
        Ok(lead) => {
            info!("Added lead {} ({})", lead.name, lead.id);
            HttpResponse::Created().json(lead)
        }
        Err(e @ AppError::Validation(_)) => {
            warn!("Rejected lead: {}", e);
            e.error_response()
        }
        Err(e) => {
            error!("Failed to add lead: {}", e);
            e.error_response()
        }
    }
}

pub fn create_lead(db: &Database, input: &LeadInput) -> AppResult<Lead> {
    let conn = db.connect()?;
    let input = normalize(&conn, input)?;
    let lead = Lead {
        id: new_id(),
        name: input.name,
        email: input.email,
        phone: input.phone,
        interested_course_id: input.interested_course_id,
        source: input.source,
        status: input.status,
        notes: input.notes,
        created_at: Utc::now(),
    };
    leads::insert(&conn, &lead)?;
    Ok(lead)
}

/// Checks required fields and that the interested course, if any, exists.
pub(crate) fn normalize(conn: &Connection, input: &LeadInput) -> AppResult<LeadInput> {
    let interested_course_id = validation::optional(input.interested_course_id.as_deref());
    if let Some(course_id) = &interested_course_id {
        if courses::find(conn, course_id)?.is_none() {
            return Err(AppError::validation("Selected course does not exist"));
        }
    }

    Ok(LeadInput {
        name: validation::required("Name", &input.name)?,
        email: validation::email(&input.email)?,
        phone: input.phone.trim().to_string(),
        interested_course_id,
        source: input.source,
        status: input.status,
        notes: validation::optional(input.notes.as_deref()),
    })
}
