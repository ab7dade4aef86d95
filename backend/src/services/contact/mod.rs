//! # Contact Service Module
//!
//! The public contact form under `/api/contact`. Submissions land in the lead
//! pipeline; no session is required.

mod submit;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/contact";

/// *   **`POST /`**: `submit::process`, `ContactRequest` body, answers `201` with the lead id.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(submit::process))
}
