//! Data model shared between the academy admin service and its clients.
//!
//! Everything in here is plain serde data: entities as they are stored, the
//! read views the admin screens render, request payloads and list queries.

pub mod jobs;
pub mod model;
pub mod query;
pub mod requests;
