//! Fixtures for the HTTP-level tests: a throwaway database with one
//! administrator already logged in, and helpers to seed records.

use crate::config::{AuthSettings, UploadSettings};
use crate::database::Database;
use crate::job_controller::state::{start_job_updater, JobsState};
use crate::services;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use chrono::NaiveDate;
use common::model::course::{Course, CourseInput, CourseLevel, CourseStatus};
use common::model::lead::{Lead, LeadInput, LeadSource, LeadStatus};
use common::model::student::{Student, StudentInput, StudentStatus};
use common::requests::LoginRequest;
use tempfile::TempDir;

pub const ADMIN_EMAIL: &str = "admin@academy.test";
pub const ADMIN_PASSWORD: &str = "correct horse battery";

pub struct TestContext {
    _dir: TempDir,
    pub db: Database,
    pub auth: AuthSettings,
    pub uploads: UploadSettings,
    pub jobs: JobsState,
    pub token: String,
}

impl TestContext {
    /// Must be called from inside an async test: it spawns the job updater.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("academy.sqlite"));
        db.init().unwrap();
        services::auth::password::provision_admin(&db, ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();

        let auth = AuthSettings {
            session_ttl: chrono::Duration::hours(1),
        };
        let session = services::auth::login(
            &db,
            &auth,
            &LoginRequest {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            },
        )
        .unwrap();

        let (jobs, rx) = JobsState::new();
        tokio::spawn(start_job_updater(jobs.clone(), rx));

        TestContext {
            _dir: dir,
            db,
            auth,
            uploads: UploadSettings {
                max_bytes: 1024 * 1024,
            },
            jobs,
            token: session.token,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.db.clone()))
            .app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::new(self.uploads.clone()))
            .app_data(web::Data::new(self.jobs.clone()))
            .configure(services::configure)
    }

    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn course_input(name: &str, fee: f64) -> CourseInput {
    CourseInput {
        name: name.to_string(),
        description: format!("All about {}", name),
        fee,
        duration: "3 months".to_string(),
        level: CourseLevel::Beginner,
        status: CourseStatus::Active,
    }
}

pub fn seed_course(db: &Database, name: &str, fee: f64) -> Course {
    services::courses::create::create_course(db, &course_input(name, fee)).unwrap()
}

pub fn student_input(student_id: &str, course_id: &str, fees_paid: f64) -> StudentInput {
    StudentInput {
        student_id: student_id.to_string(),
        name: format!("Student {}", student_id),
        email: format!("{}@example.com", student_id.to_lowercase()),
        phone: "555-0100".to_string(),
        course_id: course_id.to_string(),
        fees_paid,
        status: StudentStatus::Active,
        enrollment_date: date(2024, 1, 15),
    }
}

pub fn seed_student(db: &Database, student_id: &str, course_id: &str, fees_paid: f64) -> Student {
    let conn = db.connect().unwrap();
    services::students::create::create_student(&conn, &student_input(student_id, course_id, fees_paid))
        .unwrap()
}

pub fn lead_input(name: &str, course_id: Option<&str>) -> LeadInput {
    LeadInput {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "555-0199".to_string(),
        interested_course_id: course_id.map(str::to_string),
        source: LeadSource::Website,
        status: LeadStatus::New,
        notes: None,
    }
}

pub fn seed_lead(db: &Database, name: &str, course_id: Option<&str>) -> Lead {
    services::leads::create::create_lead(db, &lead_input(name, course_id)).unwrap()
}
