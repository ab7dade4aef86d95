use crate::database::{courses, Database};
use crate::error::AppResult;
use crate::services::auth::AdminSession;
use crate::services::listing::{cmp_ci, contains_ci, directed};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::course::Course;
use common::query::{normalize_search, CourseQuery, CourseSort};
use log::error;

/// Actix web handler for `GET /api/courses`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    query: web::Query<CourseQuery>,
) -> impl Responder {
    match list_courses(&db, &query) {
        Ok(courses) => HttpResponse::Ok().json(courses),
        Err(e) => {
            error!("Failed to load courses: {}", e);
            e.error_response()
        }
    }
}

fn list_courses(db: &Database, query: &CourseQuery) -> AppResult<Vec<Course>> {
    let conn = db.connect()?;
    let all = courses::fetch_all(&conn)?;
    Ok(filter_courses(all, query))
}

/// Applies search, filters and ordering. Without a sort key the stored order
/// is kept.
pub fn filter_courses(courses: Vec<Course>, query: &CourseQuery) -> Vec<Course> {
    let search = normalize_search(query.search.as_deref());

    let mut matched: Vec<Course> = courses
        .into_iter()
        .filter(|c| query.status.is_none_or(|s| c.status == s))
        .filter(|c| query.level.is_none_or(|l| c.level == l))
        .filter(|c| match &search {
            Some(term) => contains_ci(&c.name, term) || contains_ci(&c.description, term),
            None => true,
        })
        .collect();

    if let Some(sort) = query.sort {
        matched.sort_by(|a, b| {
            let ordering = match sort {
                CourseSort::Name => cmp_ci(&a.name, &b.name),
                CourseSort::Fee => a.fee.total_cmp(&b.fee),
                CourseSort::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            directed(ordering, query.order)
        });
    }

    matched
}
