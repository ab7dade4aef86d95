use crate::database::{courses, leads, students, Database};
use crate::error::AppResult;
use crate::services::auth::AdminSession;
use crate::services::students::list::join_courses;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::course::{Course, CourseStatus};
use common::model::dashboard::{CourseStats, DashboardStats, LeadStatusCount};
use common::model::lead::{Lead, LeadStatus};
use common::model::student::{Student, StudentStatus};
use log::error;

/// Actix web handler for `GET /api/dashboard/stats`.
pub async fn process(_admin: AdminSession, db: web::Data<Database>) -> impl Responder {
    match load_stats(&db) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            error!("Failed to compute dashboard stats: {}", e);
            e.error_response()
        }
    }
}

fn load_stats(db: &Database) -> AppResult<DashboardStats> {
    let conn = db.connect()?;
    let all_courses = courses::fetch_all(&conn)?;
    let all_students = students::fetch_all(&conn)?;
    let all_leads = leads::fetch_all(&conn)?;
    Ok(compute_stats(&all_courses, all_students, &all_leads))
}

/// Aggregates the three collections with plain linear scans.
pub fn compute_stats(courses: &[Course], students: Vec<Student>, leads: &[Lead]) -> DashboardStats {
    let count_students = |status: StudentStatus| {
        students.iter().filter(|s| s.status == status).count()
    };
    let active_courses = courses
        .iter()
        .filter(|c| c.status == CourseStatus::Active)
        .count();

    let mut stats = DashboardStats {
        total_courses: courses.len(),
        active_courses,
        inactive_courses: courses.len() - active_courses,
        total_students: students.len(),
        active_students: count_students(StudentStatus::Active),
        inactive_students: count_students(StudentStatus::Inactive),
        completed_students: count_students(StudentStatus::Completed),
        total_revenue: students.iter().map(|s| s.fees_paid).sum(),
        total_leads: leads.len(),
        ..DashboardStats::default()
    };

    stats.courses = courses
        .iter()
        .map(|course| {
            let enrolled: Vec<&Student> = students
                .iter()
                .filter(|s| s.course_id == course.id)
                .collect();
            CourseStats {
                course_id: course.id.clone(),
                course_name: course.name.clone(),
                enrolled: enrolled.len(),
                revenue: enrolled.iter().map(|s| s.fees_paid).sum(),
            }
        })
        .collect();

    stats.leads_by_status = LeadStatus::ALL
        .iter()
        .map(|&status| LeadStatusCount {
            status,
            count: leads.iter().filter(|l| l.status == status).count(),
        })
        .collect();

    let converted = leads
        .iter()
        .filter(|l| l.status == LeadStatus::Converted)
        .count();
    stats.conversion_rate = if leads.is_empty() {
        0.0
    } else {
        converted as f64 / leads.len() as f64
    };

    stats.pending_fees = join_courses(students, courses)
        .iter()
        .filter_map(|r| r.fees_due)
        .sum();

    stats
}
