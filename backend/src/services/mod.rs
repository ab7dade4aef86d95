//! HTTP API of the academy admin service.
//!
//! Each sub-module owns one area of the API and exposes a `configure_routes()`
//! returning its Actix `Scope`. Every route except login, contact and health
//! requires an admin session, enforced by the `AdminSession` extractor.

pub mod auth;
pub mod contact;
pub mod courses;
pub mod dashboard;
pub mod leads;
pub mod students;

mod listing;
mod validation;

use actix_web::{web, HttpResponse};

/// Registers every API scope on an application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        .service(auth::configure_routes())
        .service(courses::configure_routes())
        .service(students::configure_routes())
        .service(leads::configure_routes())
        .service(dashboard::configure_routes())
        .service(contact::configure_routes());
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}
