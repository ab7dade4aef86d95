//! # Bulk Lead Import
//!
//! `POST /api/leads/import` accepts a multipart upload whose `file` part is a
//! CSV of leads. The upload is checked against the digests of earlier imports
//! and then handed to a background job; the response only carries the job id,
//! which `GET /api/leads/import/status/{job_id}` reports on.
//!
//! The job reads the header (`name`, `email`, `phone` required; `source`,
//! `course`, `notes` optional, in any order and case), validates every row in
//! parallel and stops at the earliest invalid one. A file that passes is
//! inserted in a single transaction together with its digest, so a file is
//! either imported completely or not at all.

use crate::database::{courses, lead_imports, leads, new_id, Database};
use crate::error::{AppError, AppResult};
use crate::config::UploadSettings;
use crate::job_controller::state::{JobUpdate, JobsState};
use crate::services::auth::AdminSession;
use crate::services::validation;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::jobs::JobStatus;
use common::model::course::Course;
use common::model::lead::{Lead, LeadSource, LeadStatus};
use common::requests::JobCreated;
use csv::StringRecord;
use futures_util::StreamExt;
use log::{error, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::mpsc;

/// Rows inserted between two progress reports.
const PROGRESS_STEP: usize = 500;

/// Actix web handler for the upload. Answers `202 Accepted` with the job id.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    jobs: web::Data<JobsState>,
    uploads: web::Data<UploadSettings>,
    payload: Multipart,
) -> impl Responder {
    match schedule_import(&db, &jobs, uploads.max_bytes, payload).await {
        Ok(job_id) => {
            info!("Scheduled lead import job {}", job_id);
            HttpResponse::Accepted().json(JobCreated { job_id })
        }
        Err(
            e @ (AppError::Validation(_) | AppError::Conflict(_) | AppError::PayloadTooLarge(_)),
        ) => {
            warn!("Rejected lead import: {}", e);
            e.error_response()
        }
        Err(e) => {
            error!("Failed to schedule lead import: {}", e);
            e.error_response()
        }
    }
}

/// Actix web handler for `GET /api/leads/import/status/{job_id}`.
pub async fn status(
    _admin: AdminSession,
    jobs: web::Data<JobsState>,
    job_id: web::Path<String>,
) -> impl Responder {
    match jobs.status(&job_id).await {
        Some(status) => HttpResponse::Ok().json(status),
        None => AppError::NotFound("Job").error_response(),
    }
}

async fn schedule_import(
    db: &Database,
    jobs: &JobsState,
    max_bytes: usize,
    payload: Multipart,
) -> AppResult<String> {
    let bytes = read_csv_upload(payload, max_bytes).await?;
    let digest = format!("{:x}", md5::compute(&bytes));

    let conn = db.connect()?;
    if lead_imports::exists(&conn, &digest)? {
        return Err(AppError::conflict("This file has already been imported"));
    }
    drop(conn);

    let job_id = jobs.register().await;
    let tx = jobs.tx.clone();
    let db = db.clone();
    let value = job_id.clone();

    tokio::spawn(async move {
        let tx_block = tx.clone();
        let job_for_blocking = value.clone();
        let handle = tokio::task::spawn_blocking(move || {
            import_leads_blocking(&db, &tx_block, &job_for_blocking, &digest, &bytes)
        });

        let status = match handle.await {
            Ok(Ok(imported)) => {
                info!("Lead import job {} added {} leads", value, imported);
                JobStatus::Completed(format!("Imported {} leads", imported))
            }
            Ok(Err(e)) => {
                warn!("Lead import job {} failed: {}", value, e);
                JobStatus::Failed(e)
            }
            Err(join_err) => {
                error!("Lead import job {} panicked: {}", value, join_err);
                JobStatus::Failed(format!("join error: {}", join_err))
            }
        };
        let _ = tx
            .send(JobUpdate {
                job_id: value,
                status,
            })
            .await;
    });

    Ok(job_id)
}

/// Collects the `file` part of the form, refusing it once it grows past
/// `max_bytes`. Other parts are ignored.
async fn read_csv_upload(mut payload: Multipart, max_bytes: usize) -> AppResult<Vec<u8>> {
    let mut file: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::validation(format!("Invalid upload: {}", e)))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_lowercase().ends_with(".csv") {
            return Err(AppError::validation("The file must end with .csv"));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::validation(format!("Invalid upload: {}", e)))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::PayloadTooLarge(max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }
        file = Some(bytes);
    }

    file.ok_or_else(|| AppError::validation("Missing file"))
}

/// Positions of the known columns in the header.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ImportColumns {
    name: usize,
    email: usize,
    phone: usize,
    source: Option<usize>,
    course: Option<usize>,
    notes: Option<usize>,
}

impl ImportColumns {
    fn locate(headers: &StringRecord) -> Result<Self, String> {
        let position = |title: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(title))
        };
        let required = |title: &str| {
            position(title).ok_or_else(|| format!("CSV header is missing the '{}' column", title))
        };

        Ok(ImportColumns {
            name: required("name")?,
            email: required("email")?,
            phone: required("phone")?,
            source: position("source"),
            course: position("course"),
            notes: position("notes"),
        })
    }
}

/// A validated row, ready to insert.
#[derive(Debug, Clone, PartialEq)]
struct ImportedLead {
    name: String,
    email: String,
    phone: String,
    source: LeadSource,
    course_id: Option<String>,
    notes: Option<String>,
}

/// Maps both course ids and lowercased course names to the course id.
fn course_lookup(courses: &[Course]) -> HashMap<String, String> {
    let mut lookup = HashMap::with_capacity(courses.len() * 2);
    for course in courses {
        lookup.insert(course.id.clone(), course.id.clone());
        lookup.insert(course.name.trim().to_lowercase(), course.id.clone());
    }
    lookup
}

/// Parses one row, naming the offending column on failure.
fn parse_row(
    record: &StringRecord,
    columns: &ImportColumns,
    courses: &HashMap<String, String>,
) -> Result<ImportedLead, &'static str> {
    let cell = |idx: usize| record.get(idx).unwrap_or("").trim();
    let optional_cell = |idx: Option<usize>| idx.map(cell).filter(|v| !v.is_empty());

    let name = validation::required("Name", cell(columns.name)).map_err(|_| "name")?;
    let email = validation::email(cell(columns.email)).map_err(|_| "email")?;
    let source = match optional_cell(columns.source) {
        Some(raw) => raw
            .to_lowercase()
            .replace([' ', '-'], "_")
            .parse::<LeadSource>()
            .map_err(|_| "source")?,
        None => LeadSource::Import,
    };
    let course_id = match optional_cell(columns.course) {
        Some(raw) => Some(
            courses
                .get(raw)
                .or_else(|| courses.get(&raw.to_lowercase()))
                .cloned()
                .ok_or("course")?,
        ),
        None => None,
    };

    Ok(ImportedLead {
        name,
        email,
        phone: cell(columns.phone).to_string(),
        source,
        course_id,
        notes: optional_cell(columns.notes).map(str::to_string),
    })
}

/// Earliest invalid row as `(line number in the file, column)`.
fn find_first_invalid(
    rows: &[(usize, StringRecord)],
    columns: &ImportColumns,
    courses: &HashMap<String, String>,
) -> Option<(usize, &'static str)> {
    rows.par_iter().find_map_first(|(idx, record)| {
        parse_row(record, columns, courses)
            .err()
            .map(|column| (idx + 2, column)) // +2: header line, 1-based
    })
}

fn import_leads_blocking(
    db: &Database,
    tx: &mpsc::Sender<JobUpdate>,
    job_id: &str,
    digest: &str,
    bytes: &[u8],
) -> Result<usize, String> {
    let start = Instant::now();
    let _ = tx.blocking_send(JobUpdate {
        job_id: job_id.to_string(),
        status: JobStatus::InProgress(0),
    });

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| format!("Unreadable CSV header: {}", e))?
        .clone();
    let columns = ImportColumns::locate(&headers)?;

    let rows = reader
        .records()
        .enumerate()
        .map(|(idx, record)| {
            record
                .map(|r| (idx, r))
                .map_err(|e| format!("Unreadable CSV row {}: {}", idx + 2, e))
        })
        .collect::<Result<Vec<_>, String>>()?;
    if rows.is_empty() {
        return Err("The file contains no leads".to_string());
    }

    let mut conn = db.connect().map_err(|e| e.to_string())?;
    let all_courses = courses::fetch_all(&conn).map_err(|e| e.to_string())?;
    let lookup = course_lookup(&all_courses);

    if let Some((row, column)) = find_first_invalid(&rows, &columns, &lookup) {
        return Err(format!(
            "First invalid row at: row {}, column '{}'",
            row, column
        ));
    }
    let transaction = conn.transaction().map_err(|e| e.to_string())?;
    lead_imports::record(&transaction, digest, rows.len())
        .map_err(|e| AppError::from_unique(e, "This file has already been imported").to_string())?;
    for (inserted, (_, record)) in rows.iter().enumerate() {
        let row = parse_row(record, &columns, &lookup).map_err(|c| c.to_string())?;
        let lead = Lead {
            id: new_id(),
            name: row.name,
            email: row.email,
            phone: row.phone,
            interested_course_id: row.course_id,
            source: row.source,
            status: LeadStatus::New,
            notes: row.notes,
            created_at: Utc::now(),
        };
        leads::insert(&transaction, &lead).map_err(|e| e.to_string())?;

        let processed = inserted + 1;
        if processed % PROGRESS_STEP == 0 {
            let _ = tx.blocking_send(JobUpdate {
                job_id: job_id.to_string(),
                status: JobStatus::InProgress(processed as u32),
            });
        }
    }
    transaction.commit().map_err(|e| e.to_string())?;

    info!(
        "Imported {} leads for job {} in {:.2?}",
        rows.len(),
        job_id,
        start.elapsed()
    );
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_course, TestContext};
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use std::time::Duration;

    const BOUNDARY: &str = "academy-test-boundary";

    fn upload(ctx: &TestContext, filename: &str, content: &str) -> TestRequest {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        TestRequest::post()
            .uri("/api/leads/import")
            .insert_header(ctx.bearer())
            .insert_header((
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    async fn wait_for_job(ctx: &TestContext, job_id: &str) -> JobStatus {
        for _ in 0..200 {
            match ctx.jobs.status(job_id).await {
                Some(status @ (JobStatus::Completed(_) | JobStatus::Failed(_))) => return status,
                _ => tokio::time::sleep(Duration::from_millis(10)).await,
            }
        }
        panic!("job {} did not finish", job_id);
    }

    fn record(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    #[test]
    fn header_columns_are_found_in_any_order_and_case() {
        let columns = ImportColumns::locate(&record(&["Phone", "NAME", "notes", "Email"])).unwrap();
        assert_eq!(columns.name, 1);
        assert_eq!(columns.email, 3);
        assert_eq!(columns.phone, 0);
        assert_eq!(columns.notes, Some(2));
        assert_eq!(columns.source, None);

        let err = ImportColumns::locate(&record(&["name", "phone"])).unwrap_err();
        assert!(err.contains("'email'"));
    }

    #[test]
    fn earliest_invalid_row_is_reported() {
        let columns = ImportColumns::locate(&record(&["name", "email", "phone", "course"])).unwrap();
        let lookup = HashMap::from([("rust".to_string(), "c1".to_string())]);
        let mut rows: Vec<(usize, StringRecord)> = (0..500)
            .map(|i| (i, record(&["Ada", "ada@example.com", "", "Rust"])))
            .collect();
        rows[120].1 = record(&["Ada", "not-an-email", "", ""]);
        rows[400].1 = record(&["", "ada@example.com", "", ""]);

        assert_eq!(
            find_first_invalid(&rows, &columns, &lookup),
            Some((122, "email"))
        );
    }

    #[test]
    fn rows_resolve_courses_by_name_or_id_and_default_the_source() {
        let columns =
            ImportColumns::locate(&record(&["name", "email", "phone", "source", "course"])).unwrap();
        let lookup = HashMap::from([
            ("c1".to_string(), "c1".to_string()),
            ("rust basics".to_string(), "c1".to_string()),
        ]);

        let by_name = parse_row(
            &record(&["Ada", "ADA@example.com", "555", "", "Rust Basics"]),
            &columns,
            &lookup,
        )
        .unwrap();
        assert_eq!(by_name.course_id.as_deref(), Some("c1"));
        assert_eq!(by_name.source, LeadSource::Import);
        assert_eq!(by_name.email, "ada@example.com");

        let by_id = parse_row(
            &record(&["Ada", "ada@example.com", "", "Walk In", "c1"]),
            &columns,
            &lookup,
        )
        .unwrap();
        assert_eq!(by_id.source, LeadSource::WalkIn);

        assert_eq!(
            parse_row(
                &record(&["Ada", "ada@example.com", "", "", "Cobol"]),
                &columns,
                &lookup
            ),
            Err("course")
        );
    }

    #[test]
    fn progress_counts_inserted_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("academy.sqlite"));
        db.init().unwrap();
        let mut csv = String::from("name,email,phone\n");
        for i in 0..1200 {
            csv.push_str(&format!("Lead {i},lead{i}@example.com,555-{i:04}\n"));
        }
        let (tx, mut rx) = mpsc::channel(16);

        let imported = import_leads_blocking(&db, &tx, "job-1", "digest", csv.as_bytes()).unwrap();
        assert_eq!(imported, 1200);

        drop(tx);
        let mut reported = Vec::new();
        while let Ok(update) = rx.try_recv() {
            reported.push(update.status);
        }
        assert_eq!(
            reported,
            vec![
                JobStatus::InProgress(0),
                JobStatus::InProgress(500),
                JobStatus::InProgress(1000),
            ]
        );
    }

    #[actix_web::test]
    async fn imports_every_row_and_rejects_the_same_file_twice() {
        let ctx = TestContext::new();
        seed_course(&ctx.db, "Rust", 300.0);
        let app = init_service(ctx.app()).await;
        let csv = "name,email,phone,course,notes\n\
                   Ada Lovelace,ada@example.com,555-0001,Rust,met at fair\n\
                   Alan Turing,alan@example.com,555-0002,,\n";

        let resp = call_service(&app, upload(&ctx, "leads.csv", csv).to_request()).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        let created: JobCreated = read_body_json(resp).await;
        assert_eq!(
            wait_for_job(&ctx, &created.job_id).await,
            JobStatus::Completed("Imported 2 leads".to_string())
        );

        let conn = ctx.db.connect().unwrap();
        let imported = leads::fetch_all(&conn).unwrap();
        assert_eq!(imported.len(), 2);
        assert!(imported.iter().all(|l| l.source == LeadSource::Import));
        assert!(imported[0].interested_course_id.is_some());
        assert_eq!(imported[0].notes.as_deref(), Some("met at fair"));

        let resp = call_service(&app, upload(&ctx, "leads.csv", csv).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn one_bad_row_fails_the_whole_file() {
        let ctx = TestContext::new();
        let app = init_service(ctx.app()).await;
        let csv = "name,email,phone\n\
                   Ada Lovelace,ada@example.com,555-0001\n\
                   Alan Turing,alan-at-example,555-0002\n";

        let resp = call_service(&app, upload(&ctx, "leads.csv", csv).to_request()).await;
        let created: JobCreated = read_body_json(resp).await;
        assert_eq!(
            wait_for_job(&ctx, &created.job_id).await,
            JobStatus::Failed("First invalid row at: row 3, column 'email'".to_string())
        );

        let conn = ctx.db.connect().unwrap();
        assert!(leads::fetch_all(&conn).unwrap().is_empty());
        let digest = format!("{:x}", md5::compute(csv.as_bytes()));
        assert!(!lead_imports::exists(&conn, &digest).unwrap());
    }

    #[actix_web::test]
    async fn only_csv_files_are_accepted() {
        let ctx = TestContext::new();
        let app = init_service(ctx.app()).await;

        let resp =
            call_service(&app, upload(&ctx, "leads.xlsx", "name\n").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn oversized_uploads_are_refused() {
        let mut ctx = TestContext::new();
        ctx.uploads.max_bytes = 32;
        let app = init_service(ctx.app()).await;
        let csv = "name,email,phone\nAda Lovelace,ada@example.com,555-0001\n";

        let resp = call_service(&app, upload(&ctx, "leads.csv", csv).to_request()).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(ctx.jobs.jobs.read().await.is_empty());
    }

    #[actix_web::test]
    async fn unknown_job_status_is_not_found() {
        let ctx = TestContext::new();
        let app = init_service(ctx.app()).await;

        let req = TestRequest::get()
            .uri("/api/leads/import/status/missing")
            .insert_header(ctx.bearer())
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
