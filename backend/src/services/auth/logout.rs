use crate::database::Database;
use crate::error::AppResult;
use crate::services::auth::AdminSession;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::{error, info};
use rusqlite::params;

/// Actix web handler for `POST /api/auth/logout`. Answers `204 No Content`.
pub async fn process(db: web::Data<Database>, admin: AdminSession) -> impl Responder {
    match logout(&db, &admin.0.token) {
        Ok(()) => {
            info!("Administrator {} logged out", admin.0.email);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            error!("Failed to log out: {}", e);
            e.error_response()
        }
    }
}

fn logout(db: &Database, token: &str) -> AppResult<()> {
    let conn = db.connect()?;
    conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(())
}
