use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated administrator session.
///
/// The `token` is presented back as `Authorization: Bearer <token>` until
/// `expires_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
