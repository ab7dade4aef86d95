use crate::model::UnknownVariant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A prospective student captured before enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String, // UUID
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub interested_course_id: Option<String>,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A lead joined with the name of the course it is interested in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    #[serde(flatten)]
    pub lead: Lead,
    pub interested_course_name: Option<String>,
}

/// Editable fields of a lead, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub interested_course_id: Option<String>,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    Referral,
    SocialMedia,
    WalkIn,
    Phone,
    ContactForm,
    Import,
    #[default]
    Other,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::Referral => "referral",
            LeadSource::SocialMedia => "social_media",
            LeadSource::WalkIn => "walk_in",
            LeadSource::Phone => "phone",
            LeadSource::ContactForm => "contact_form",
            LeadSource::Import => "import",
            LeadSource::Other => "other",
        }
    }
}

impl FromStr for LeadSource {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "website" => Ok(LeadSource::Website),
            "referral" => Ok(LeadSource::Referral),
            "social_media" => Ok(LeadSource::SocialMedia),
            "walk_in" => Ok(LeadSource::WalkIn),
            "phone" => Ok(LeadSource::Phone),
            "contact_form" => Ok(LeadSource::ContactForm),
            "import" => Ok(LeadSource::Import),
            "other" => Ok(LeadSource::Other),
            other => Err(UnknownVariant::new("lead source", other)),
        }
    }
}

/// Sales pipeline position of a lead. `Converted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Interested,
    NotInterested,
    Converted,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Interested,
        LeadStatus::NotInterested,
        LeadStatus::Converted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Interested => "interested",
            LeadStatus::NotInterested => "not_interested",
            LeadStatus::Converted => "converted",
        }
    }
}

impl FromStr for LeadStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "interested" => Ok(LeadStatus::Interested),
            "not_interested" => Ok(LeadStatus::NotInterested),
            "converted" => Ok(LeadStatus::Converted),
            other => Err(UnknownVariant::new("lead status", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_word_variants_use_snake_case() {
        assert_eq!(
            serde_json::to_string(&LeadSource::SocialMedia).unwrap(),
            "\"social_media\""
        );
        assert_eq!(
            serde_json::to_string(&LeadStatus::NotInterested).unwrap(),
            "\"not_interested\""
        );
        assert_eq!("walk_in".parse::<LeadSource>().unwrap(), LeadSource::WalkIn);
    }

    #[test]
    fn every_status_round_trips_through_its_string() {
        for status in LeadStatus::ALL {
            assert_eq!(status.as_str().parse::<LeadStatus>().unwrap(), status);
        }
    }
}
