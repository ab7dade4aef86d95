use crate::database::Database;
use crate::error::{AppError, AppResult};
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use common::model::auth::Session;
use futures_util::future::{ready, Ready};
use log::info;
use rusqlite::{params, OptionalExtension};

/// Proof that the request carries a live admin session.
///
/// Taking this as a handler argument is what makes a route admin-only: when the
/// bearer token is missing, unknown or expired the request is answered with
/// `401` before the handler runs.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> AppResult<AdminSession> {
    let token = bearer_token(req).ok_or(AppError::Unauthorized)?;
    let db = req
        .app_data::<web::Data<Database>>()
        .ok_or_else(|| AppError::Internal("database is not configured".to_string()))?;
    let session = find_session(db, token, Utc::now())?.ok_or(AppError::Unauthorized)?;
    Ok(AdminSession(session))
}

pub(super) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Looks up a session, deleting it instead when it expired before `now`.
pub(super) fn find_session(
    db: &Database,
    token: &str,
    now: DateTime<Utc>,
) -> AppResult<Option<Session>> {
    let conn = db.connect()?;
    let session = conn
        .query_row(
            "SELECT s.token, a.email, s.created_at, s.expires_at
             FROM sessions s JOIN admins a ON a.id = s.admin_id
             WHERE s.token = ?1",
            params![token],
            |row| {
                Ok(Session {
                    token: row.get(0)?,
                    email: row.get(1)?,
                    created_at: row.get(2)?,
                    expires_at: row.get(3)?,
                })
            },
        )
        .optional()?;

    match session {
        Some(s) if s.expires_at <= now => {
            conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
            info!("Session for {} expired", s.email);
            Ok(None)
        }
        other => Ok(other),
    }
}

/// Actix web handler for `GET /api/auth/session`.
pub async fn process(admin: AdminSession) -> impl Responder {
    HttpResponse::Ok().json(admin.0)
}
