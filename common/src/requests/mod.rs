use crate::model::student::StudentStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Operator-entered values completing a lead's conversion into a student.
///
/// `course_id` defaults to the lead's interested course when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertLeadRequest {
    pub student_id: String,
    #[serde(default)]
    pub fees_paid: f64,
    pub enrollment_date: NaiveDate,
    #[serde(default)]
    pub status: StudentStatus,
    #[serde(default)]
    pub course_id: Option<String>,
}

/// Payload of the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
    #[serde(default)]
    pub course_id: Option<String>,
}

/// Returned when a background job has been scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCreated {
    pub job_id: String,
}
