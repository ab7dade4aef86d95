use serde::{Deserialize, Serialize};

/// Aggregates shown on the admin dashboard, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_courses: usize,
    pub active_courses: usize,
    pub inactive_courses: usize,

    pub total_students: usize,
    pub active_students: usize,
    pub inactive_students: usize,
    pub completed_students: usize,

    /// Sum of `feesPaid` over every student.
    pub total_revenue: f64,
    /// Sum of the outstanding balance of students whose course resolves.
    pub pending_fees: f64,

    pub total_leads: usize,
    pub leads_by_status: Vec<LeadStatusCount>,
    /// Converted leads over all leads, in `[0, 1]`.
    pub conversion_rate: f64,

    pub courses: Vec<CourseStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStatusCount {
    pub status: crate::model::lead::LeadStatus,
    pub count: usize,
}

/// Enrollment and revenue of a single course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStats {
    pub course_id: String,
    pub course_name: String,
    pub enrolled: usize,
    pub revenue: f64,
}
