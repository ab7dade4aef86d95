//! # Dashboard Service Module
//!
//! Read-only aggregates for the admin landing page under `/api/dashboard`.
//! Figures are recomputed from the full tables on every request.

mod stats;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/dashboard";

/// *   **`GET /stats`**: `stats::process`, answers with `DashboardStats`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/stats", get().to(stats::process))
}
