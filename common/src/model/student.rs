use crate::model::UnknownVariant;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An enrolled student as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String, // UUID
    /// Operator-assigned identifier, unique and alphanumeric.
    pub student_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub course_id: String,
    pub fees_paid: f64,
    pub status: StudentStatus,
    pub enrollment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A student joined with the course it references.
///
/// The course fields are `None` when the referenced course no longer resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(flatten)]
    pub student: Student,
    pub course_name: Option<String>,
    pub course_fee: Option<f64>,
    pub fees_due: Option<f64>,
}

/// Editable fields of a student, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub student_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub course_id: String,
    #[serde(default)]
    pub fees_paid: f64,
    #[serde(default)]
    pub status: StudentStatus,
    pub enrollment_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Completed,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
            StudentStatus::Completed => "completed",
        }
    }
}

impl FromStr for StudentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            "completed" => Ok(StudentStatus::Completed),
            other => Err(UnknownVariant::new("student status", other)),
        }
    }
}
