use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::services::leads::create::create_lead;
use crate::services::validation;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::lead::{Lead, LeadInput, LeadSource, LeadStatus};
use common::requests::ContactRequest;
use log::{error, info, warn};
use serde_json::json;

/// Actix web handler for `POST /api/contact`. Public.
pub async fn process(db: web::Data<Database>, payload: web::Json<ContactRequest>) -> impl Responder {
    match submit_contact(&db, &payload) {
        Ok(lead) => {
            info!("Contact form submitted by {} ({})", lead.email, lead.id);
            HttpResponse::Created().json(json!({ "id": lead.id }))
        }
        Err(e @ AppError::Validation(_)) => {
            warn!("Rejected contact form: {}", e);
            e.error_response()
        }
        Err(e) => {
            error!("Failed to store contact form: {}", e);
            e.error_response()
        }
    }
}

/// Stores the submission as a new lead, keeping the message as its notes.
pub fn submit_contact(db: &Database, req: &ContactRequest) -> AppResult<Lead> {
    let message = validation::required("Message", &req.message)?;
    create_lead(
        db,
        &LeadInput {
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            interested_course_id: req.course_id.clone(),
            source: LeadSource::ContactForm,
            status: LeadStatus::New,
            notes: Some(message),
        },
    )
}
