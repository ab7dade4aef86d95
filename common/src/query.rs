//! Query-string parameters of the list endpoints.
//!
//! Every parameter is optional; an empty query lists everything in the
//! default order.

use crate::model::course::{CourseLevel, CourseStatus};
use crate::model::lead::{LeadSource, LeadStatus};
use crate::model::student::StudentStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseQuery {
    /// Case-insensitive match against name or description.
    pub search: Option<String>,
    pub status: Option<CourseStatus>,
    pub level: Option<CourseLevel>,
    pub sort: Option<CourseSort>,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseSort {
    Name,
    Fee,
    CreatedAt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQuery {
    /// Case-insensitive match against name, student id or email.
    pub search: Option<String>,
    pub course_id: Option<String>,
    pub status: Option<StudentStatus>,
    pub sort: Option<StudentSort>,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentSort {
    Name,
    StudentId,
    EnrollmentDate,
    FeesPaid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadQuery {
    /// Case-insensitive match against name, email or phone.
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub sort: Option<LeadSort>,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSort {
    Name,
    CreatedAt,
}

/// Lowercased, trimmed search term, or `None` when there is nothing to match.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}
