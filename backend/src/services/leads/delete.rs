use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::services::auth::AdminSession;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::{error, info};
use rusqlite::params;

/// Actix web handler for `DELETE /api/leads/{lead_id}`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    lead_id: web::Path<String>,
) -> impl Responder {
    match delete_lead(&db, &lead_id) {
        Ok(()) => {
            info!("Deleted lead {}", lead_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            error!("Failed to delete lead {}: {}", lead_id, e);
            e.error_response()
        }
    }
}

fn delete_lead(db: &Database, lead_id: &str) -> AppResult<()> {
    let conn = db.connect()?;
    let deleted = conn.execute("DELETE FROM leads WHERE id = ?1", params![lead_id])?;
    if deleted == 0 {
        return Err(AppError::NotFound("Lead"));
    }
    Ok(())
}
