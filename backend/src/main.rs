mod config;
mod database;
mod error;
mod job_controller;
mod services;
#[cfg(test)]
mod test_support;

use crate::config::{AuthSettings, Config, UploadSettings};
use crate::database::Database;
use crate::job_controller::state::JobsState;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::parse();

    let db = Database::new(&config.database);
    db.init().map_err(io::Error::other)?;

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        if let Err(e) = services::auth::password::provision_admin(&db, email, password) {
            error!("Could not provision administrator {}: {}", email, e);
            return Err(io::Error::other(e.to_string()));
        }
    }

    // Initialize job controller state
    let (jobs_state, rx) = JobsState::new();

    // Start job updater task
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });

    let auth_settings = AuthSettings::from(&config);
    let upload_settings = UploadSettings::from(&config);
    let json_limit = config.json_limit;

    info!("Server running at {}", config.bind_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(auth_settings.clone()))
            .app_data(web::Data::new(upload_settings.clone()))
            .app_data(web::Data::new(jobs_state.clone()))
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
