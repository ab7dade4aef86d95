use serde::{Deserialize, Serialize};

/// Lifecycle of a background job as reported to polling clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    /// Rows processed so far.
    InProgress(u32),
    Completed(String),
    Failed(String),
}
