use crate::database::{courses, students, Database};
use crate::error::AppResult;
use crate::services::auth::AdminSession;
use crate::services::listing::{cmp_ci, contains_ci, directed};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::course::Course;
use common::model::student::{Student, StudentRecord};
use common::query::{normalize_search, StudentQuery, StudentSort};
use log::error;

/// Actix web handler for `GET /api/students`.
pub async fn process(
    _admin: AdminSession,
    db: web::Data<Database>,
    query: web::Query<StudentQuery>,
) -> impl Responder {
    match list_students(&db, &query) {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            error!("Failed to load students: {}", e);
            e.error_response()
        }
    }
}

fn list_students(db: &Database, query: &StudentQuery) -> AppResult<Vec<StudentRecord>> {
    let records = load_records(db)?;
    Ok(filter_students(records, query))
}

/// Every student joined with its course, in stored order.
pub(crate) fn load_records(db: &Database) -> AppResult<Vec<StudentRecord>> {
    let conn = db.connect()?;
    let all_courses = courses::fetch_all(&conn)?;
    let all_students = students::fetch_all(&conn)?;
    Ok(join_courses(all_students, &all_courses))
}

/// Resolves each student's course by scanning the course list.
pub fn join_courses(students: Vec<Student>, courses: &[Course]) -> Vec<StudentRecord> {
    students
        .into_iter()
        .map(|student| {
            let course = courses.iter().find(|c| c.id == student.course_id);
            StudentRecord {
                course_name: course.map(|c| c.name.clone()),
                course_fee: course.map(|c| c.fee),
                fees_due: course.map(|c| (c.fee - student.fees_paid).max(0.0)),
                student,
            }
        })
        .collect()
}

pub fn filter_students(records: Vec<StudentRecord>, query: &StudentQuery) -> Vec<StudentRecord> {
    let search = normalize_search(query.search.as_deref());

    let mut matched: Vec<StudentRecord> = records
        .into_iter()
        .filter(|r| query.status.is_none_or(|s| r.student.status == s))
        .filter(|r| {
            query
                .course_id
                .as_deref()
                .is_none_or(|id| r.student.course_id == id)
        })
        .filter(|r| match &search {
            Some(term) => {
                contains_ci(&r.student.name, term)
                    || contains_ci(&r.student.student_id, term)
                    || contains_ci(&r.student.email, term)
            }
            None => true,
        })
        .collect();

    if let Some(sort) = query.sort {
        matched.sort_by(|a, b| {
            let (a, b) = (&a.student, &b.student);
            let ordering = match sort {
                StudentSort::Name => cmp_ci(&a.name, &b.name),
                StudentSort::StudentId => cmp_ci(&a.student_id, &b.student_id),
                StudentSort::EnrollmentDate => a.enrollment_date.cmp(&b.enrollment_date),
                StudentSort::FeesPaid => a.fees_paid.total_cmp(&b.fees_paid),
            };
            directed(ordering, query.order)
        });
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_course, seed_student, TestContext};
    use actix_web::test::{call_and_read_body_json, init_service, TestRequest};
    use common::model::student::StudentStatus;
    use common::query::SortOrder;

    #[actix_web::test]
    async fn joins_course_and_computes_fees_due() {
        let ctx = TestContext::new();
        let rust = seed_course(&ctx.db, "Rust", 300.0);
        seed_student(&ctx.db, "A1", &rust.id, 120.0);
        let app = init_service(ctx.app()).await;

        let req = TestRequest::get()
            .uri("/api/students")
            .insert_header(ctx.bearer())
            .to_request();
        let records: Vec<StudentRecord> = call_and_read_body_json(&app, req).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].course_name.as_deref(), Some("Rust"));
        assert_eq!(records[0].fees_due, Some(180.0));
    }

    #[actix_web::test]
    async fn filters_by_course_status_and_search() {
        let ctx = TestContext::new();
        let rust = seed_course(&ctx.db, "Rust", 300.0);
        let go = seed_course(&ctx.db, "Go", 200.0);
        seed_student(&ctx.db, "R1", &rust.id, 0.0);
        seed_student(&ctx.db, "R2", &rust.id, 50.0);
        seed_student(&ctx.db, "G1", &go.id, 0.0);

        let records = load_records(&ctx.db).unwrap();
        let query = StudentQuery {
            course_id: Some(rust.id.clone()),
            sort: Some(StudentSort::FeesPaid),
            order: SortOrder::Desc,
            ..Default::default()
        };
        let ids: Vec<String> = filter_students(records.clone(), &query)
            .into_iter()
            .map(|r| r.student.student_id)
            .collect();
        assert_eq!(ids, vec!["R2", "R1"]);

        let query = StudentQuery {
            search: Some("g1@EXAMPLE".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_students(records.clone(), &query).len(), 1);

        let query = StudentQuery {
            status: Some(StudentStatus::Completed),
            ..Default::default()
        };
        assert!(filter_students(records, &query).is_empty());
    }

    #[test]
    fn unresolved_course_leaves_fields_empty() {
        let student = Student {
            id: "s".to_string(),
            student_id: "X1".to_string(),
            name: "Orphan".to_string(),
            email: "x1@example.com".to_string(),
            phone: String::new(),
            course_id: "gone".to_string(),
            fees_paid: 10.0,
            status: StudentStatus::Active,
            enrollment_date: crate::test_support::date(2024, 5, 1),
            created_at: chrono::Utc::now(),
        };
        let records = join_courses(vec![student], &[]);
        assert_eq!(records[0].course_name, None);
        assert_eq!(records[0].fees_due, None);
    }
}
