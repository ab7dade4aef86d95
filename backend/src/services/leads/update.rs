use crate::database::{leads, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use crate::services::leads::create::normalize;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::lead::{Lead, LeadInput, LeadStatus};
use log::{error, info};
use rusqlite::{params, Connection};

/// Actix web handler for `PUT /api/leads/{lead_id}`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    lead_id: web::Path<String>,
    payload: web::Json<LeadInput>,
) -> impl Responder {
    match update_lead(&db, &lead_id, &payload) {
        Ok(lead) => {
            info!("Updated lead {}", lead.id);
            HttpResponse::Ok().json(lead)
        }
        Err(e) => {
            error!("Failed to update lead {}: {}", lead_id, e);
            e.error_response()
        }
    }
}

/// `Converted` is only entered through the convert action and never left.
fn update_lead(db: &Database, lead_id: &str, input: &LeadInput) -> AppResult<Lead> {
    let conn = db.connect()?;
    let current = leads::find(&conn, lead_id)?.ok_or(AppError::NotFound("Lead"))?;
    let input = normalize(&conn, input)?;

    match (current.status, input.status) {
        (LeadStatus::Converted, LeadStatus::Converted) => {}
        (LeadStatus::Converted, _) => {
            return Err(AppError::validation("A converted lead keeps its status"));
        }
        (_, LeadStatus::Converted) => {
            return Err(AppError::validation(
                "Leads become converted only through conversion",
            ));
        }
        _ => {}
    }

    write_lead(&conn, lead_id, &input)?;
    Ok(Lead {
        id: current.id,
        name: input.name,
        email: input.email,
        phone: input.phone,
        interested_course_id: input.interested_course_id,
        source: input.source,
        status: input.status,
        notes: input.notes,
        created_at: current.created_at,
    })
}

/// The guard in the statement keeps a lead converted meanwhile from being moved back.
fn write_lead(conn: &Connection, lead_id: &str, input: &LeadInput) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE leads SET name = ?1, email = ?2, phone = ?3, interested_course_id = ?4,
                          source = ?5, status = ?6, notes = ?7
         WHERE id = ?8 AND (status != 'converted' OR ?6 = 'converted')",
        params![
            input.name,
            input.email,
            input.phone,
            input.interested_course_id,
            input.source.as_str(),
            input.status.as_str(),
            input.notes,
            lead_id,
        ],
    )?;
    if changed == 0 {
        return match leads::find(conn, lead_id)? {
            Some(_) => Err(AppError::validation("A converted lead keeps its status")),
            None => Err(AppError::NotFound("Lead")),
        };
    }
    Ok(())
}
