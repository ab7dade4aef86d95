use crate::database::{new_id, Database};
use crate::error::{AppError, AppResult};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use log::info;
use rusqlite::{params, OptionalExtension};
use std::sync::OnceLock;

/// Hashes a password into an Argon2 PHC string.
pub fn hash(password: &str) -> AppResult<String> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// False for a wrong password and for a malformed stored hash alike.
pub fn verify(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// A hash of a random password, verified against when the email is unknown so
/// that both login failures cost one Argon2 run.
pub fn decoy_hash() -> &'static str {
    static DECOY: OnceLock<String> = OnceLock::new();
    DECOY.get_or_init(|| hash(&new_id()).unwrap_or_default())
}

/// Creates the administrator unless one with that email already exists.
///
/// Returns whether a new account was created.
pub fn provision_admin(db: &Database, email: &str, password: &str) -> AppResult<bool> {
    let email = crate::services::validation::email(email)?;
    if password.is_empty() {
        return Err(AppError::validation("Admin password must not be empty"));
    }

    let conn = db.connect()?;
    let existing: Option<String> = conn
        .query_row(
            "SELECT id FROM admins WHERE email = ?1",
            params![email],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Ok(false);
    }

    conn.execute(
        "INSERT INTO admins (id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![new_id(), email, hash(password)?, Utc::now()],
    )?;
    info!("Provisioned administrator {}", email);
    Ok(true)
}
