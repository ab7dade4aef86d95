use crate::database::{courses, leads, Database};
use crate::error::AppResult;
use crate::services::auth::AdminSession;
use crate::services::listing::{cmp_ci, contains_ci, directed};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::course::Course;
use common::model::lead::{Lead, LeadRecord};
use common::query::{normalize_search, LeadQuery, LeadSort};
use log::error;

/// Actix web handler for `GET /api/leads`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    query: web::Query<LeadQuery>,
) -> impl Responder {
    match list_leads(&db, &query) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            error!("Failed to load leads: {}", e);
            e.error_response()
        }
    }
}

fn list_leads(db: &Database, query: &LeadQuery) -> AppResult<Vec<LeadRecord>> {
    let conn = db.connect()?;
    let all_courses = courses::fetch_all(&conn)?;
    let all_leads = leads::fetch_all(&conn)?;
    Ok(filter_leads(join_courses(all_leads, &all_courses), query))
}

pub(super) fn join_courses(leads: Vec<Lead>, courses: &[Course]) -> Vec<LeadRecord> {
    leads
        .into_iter()
        .map(|lead| {
            let interested_course_name = lead.interested_course_id.as_deref().and_then(|id| {
                courses
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| c.name.clone())
            });
            LeadRecord {
                lead,
                interested_course_name,
            }
        })
        .collect()
}

fn filter_leads(records: Vec<LeadRecord>, query: &LeadQuery) -> Vec<LeadRecord> {
    let search = normalize_search(query.search.as_deref());

    let mut matched: Vec<LeadRecord> = records
        .into_iter()
        .filter(|r| query.status.is_none_or(|s| r.lead.status == s))
        .filter(|r| query.source.is_none_or(|s| r.lead.source == s))
        .filter(|r| match &search {
            Some(term) => {
                contains_ci(&r.lead.name, term)
                    || contains_ci(&r.lead.email, term)
                    || contains_ci(&r.lead.phone, term)
            }
            None => true,
        })
        .collect();

    if let Some(sort) = query.sort {
        matched.sort_by(|a, b| {
            let ordering = match sort {
                LeadSort::Name => cmp_ci(&a.lead.name, &b.lead.name),
                LeadSort::CreatedAt => a.lead.created_at.cmp(&b.lead.created_at),
            };
            directed(ordering, query.order)
        });
    }

    matched
}
