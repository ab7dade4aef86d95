use crate::model::UnknownVariant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A course offered by the academy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String, // UUID
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Full fee of the course. Fees paid by a student never exceed it.
    pub fee: f64,
    /// Free text as entered by the operator, e.g. "3 months".
    pub duration: String,
    pub level: CourseLevel,
    pub status: CourseStatus,
    pub created_at: DateTime<Utc>,
}

/// Editable fields of a course, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fee: f64,
    pub duration: String,
    pub level: CourseLevel,
    #[serde(default)]
    pub status: CourseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for CourseLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            other => Err(UnknownVariant::new("course level", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    #[default]
    Active,
    Inactive,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Active => "active",
            CourseStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for CourseStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CourseStatus::Active),
            "inactive" => Ok(CourseStatus::Inactive),
            other => Err(UnknownVariant::new("course status", other)),
        }
    }
}
