//! # Auth Service Module
//!
//! Email/password sessions for administrators, under `/api/auth`.
//!
//! ## Sub-modules:
//! - `login`: Verifies credentials and opens a session.
//! - `session`: The `AdminSession` extractor guarding admin routes, and the
//!   endpoint returning the current session.
//! - `logout`: Deletes the current session.
//! - `password`: Argon2 hashing and startup provisioning of an administrator.

mod login;
mod logout;
pub mod password;
mod session;

pub use login::login;
pub use session::AdminSession;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/auth";

/// Configures and returns the Actix `Scope` for the auth routes.
///
/// *   **`POST /login`**: `LoginRequest` in, `Session` out. 401 on bad credentials.
/// *   **`GET /session`**: The session identified by the bearer token.
/// *   **`POST /logout`**: Ends the session identified by the bearer token.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/login", post().to(login::process))
        .route("/session", get().to(session::process))
        .route("/logout", post().to(logout::process))
}
