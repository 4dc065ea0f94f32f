//! Wire types for the three automation operations.
//!
//! Field names follow the portal client's JSON (camelCase, `requestId`,
//! `eventDate`, `data`). Every operation returns either its stage-specific
//! success payload or the shared failure payload.

use serde::{Deserialize, Serialize};

use crate::models::credentials::Credentials;
use crate::models::event::EventDescriptor;
use crate::models::race::RaceResult;

/// Fixed remediation text attached to every failure payload.
pub const REMEDIATION_SUGGESTION: &str = "Check credentials and network connection";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportsRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub sport: String,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub sport: String,
    /// Two-token composite date string copied from the chosen event row.
    pub event_date: String,
    pub data: Vec<RaceResult>,
    pub request_id: String,
}

/// Failure payload shared by all three operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailurePayload {
    pub success: bool,
    pub error: String,
    pub details: String,
    pub suggestion: String,
}

impl FailurePayload {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: details.into(),
            suggestion: REMEDIATION_SUGGESTION.to_string(),
        }
    }
}

/// Success payload of the submission operation.
///
/// Unknown fields are rejected so the untagged response enum can tell this
/// apart from the failure payload when parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmitOutcome {
    pub success: bool,
    /// Non-fatal degradations observed while submitting, e.g. lane saves
    /// whose confirmation timed out. Empty on a fully confirmed run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SubmitOutcome {
    pub fn ok(warnings: Vec<String>) -> Self {
        Self {
            success: true,
            warnings,
        }
    }
}

/// Either a stage-specific success payload or the shared failure payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Ok(T),
    Err(FailurePayload),
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiResponse::Ok(_))
    }
}

pub type SportsResponse = ApiResponse<Vec<String>>;
pub type EventsResponse = ApiResponse<Vec<EventDescriptor>>;
pub type SubmitResponse = ApiResponse<SubmitOutcome>;
