use crate::config::AuthSettings;
use crate::database::{new_id, Database};
use crate::error::{AppError, AppResult};
use crate::services::auth::password;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::model::auth::Session;
use common::requests::LoginRequest;
use log::{info, warn};
use rusqlite::{params, OptionalExtension};

/// Actix web handler for `POST /api/auth/login`.
///
/// # Returns
/// - `200 OK` with the new `Session`.
/// - `401 Unauthorized` for an unknown email or a wrong password, without
///   telling the two apart. Both paths run one Argon2 verification, on the
///   blocking pool.
pub async fn process(
    db: web::Data<Database>,
    settings: web::Data<AuthSettings>,
    payload: web::Json<LoginRequest>,
) -> impl Responder {
    let req = payload.into_inner();
    let email = req.email.clone();
    let result = web::block(move || login(&db, &settings, &req))
        .await
        .unwrap_or_else(|e| Err(AppError::Internal(e.to_string())));

    match result {
        Ok(session) => {
            info!("Administrator {} logged in", session.email);
            HttpResponse::Ok().json(session)
        }
        Err(e) => {
            warn!("Login failed for {}: {}", email, e);
            e.error_response()
        }
    }
}

pub fn login(db: &Database, settings: &AuthSettings, req: &LoginRequest) -> AppResult<Session> {
    let email = req.email.trim().to_lowercase();
    let conn = db.connect()?;

    let admin: Option<(String, String)> = conn
        .query_row(
            "SELECT id, password_hash FROM admins WHERE email = ?1",
            params![email],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    let Some((admin_id, password_hash)) = admin else {
        let _ = password::verify(&req.password, password::decoy_hash());
        return Err(AppError::InvalidCredentials);
    };

    if !password::verify(&req.password, &password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let now = Utc::now();
    let session = Session {
        token: new_id(),
        email,
        created_at: now,
        expires_at: now + settings.session_ttl,
    };
    conn.execute(
        "INSERT INTO sessions (token, admin_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
        params![session.token, admin_id, session.created_at, session.expires_at],
    )?;

    Ok(session)
}
