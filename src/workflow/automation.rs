//! The automation call boundary.
//!
//! Each operation is independent: validate the request, acquire a fresh
//! session, authenticate, do the stage work, release the session on every
//! exit path, write one audit record, and translate any failure into the
//! wire payload. No session or cookie state is shared between operations;
//! each one re-authenticates from scratch.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{error, info};

use crate::audit::{AuditRecord, AuditSink, FileAuditSink};
use crate::browser::{self, PortalSession};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::infrastructure::PortalPage;
use crate::models::{
    ApiResponse, Credentials, EventDescriptor, EventsRequest, EventsResponse, FailurePayload,
    SportsRequest, SportsResponse, SubmitOutcome, SubmitRequest, SubmitResponse,
};
use crate::services::{directory, locators::Locators, login, schedule, submission};

/// Entry point for the three portal automation operations.
pub struct Automation {
    config: Config,
    audit: Arc<dyn AuditSink>,
}

impl Automation {
    pub fn new(config: Config, audit: Arc<dyn AuditSink>) -> Self {
        Self { config, audit }
    }

    /// Construct with the file audit sink the config points at.
    pub fn with_default_sink(config: Config) -> Self {
        let sink = Arc::new(FileAuditSink::new(config.audit_log_file.clone()));
        Self::new(config, sink)
    }

    /// List the sports visible to the account.
    pub async fn list_sports(&self, request: SportsRequest) -> SportsResponse {
        info!("▶ list-sports ({})", request.request_id);
        let response = match self.run_list_sports(&request).await {
            Ok(sports) => ApiResponse::Ok(sports),
            Err(err) => {
                error!("❌ list-sports failed: {}", err);
                ApiResponse::Err(FailurePayload::new("Failed to fetch sports", err.to_string()))
            }
        };
        self.record(&request.request_id, &request.credentials.username, &request, &response);
        response
    }

    /// List the scheduled events for one sport.
    pub async fn list_events(&self, request: EventsRequest) -> EventsResponse {
        info!("▶ list-events ({}) sport={:?}", request.request_id, request.sport);
        let response = match self.run_list_events(&request).await {
            Ok(events) => ApiResponse::Ok(events),
            Err(err) => {
                error!("❌ list-events failed: {}", err);
                ApiResponse::Err(FailurePayload::new("Failed to fetch events", err.to_string()))
            }
        };
        self.record(&request.request_id, &request.credentials.username, &request, &response);
        response
    }

    /// Submit race results into one event's result-entry screens.
    pub async fn submit_results(&self, request: SubmitRequest) -> SubmitResponse {
        info!(
            "▶ submit-results ({}) sport={:?} event={:?} races={}",
            request.request_id,
            request.sport,
            request.event_date,
            request.data.len()
        );
        let response = match self.run_submit(&request).await {
            Ok(report) => {
                for warning in &report.warnings {
                    info!("submission warning: {}", warning);
                }
                ApiResponse::Ok(SubmitOutcome::ok(report.warnings))
            }
            Err(err) => {
                error!("❌ submit-results failed: {}", err);
                ApiResponse::Err(FailurePayload::new("Failed to submit results", err.to_string()))
            }
        };
        self.record(&request.request_id, &request.credentials.username, &request, &response);
        response
    }

    async fn run_list_sports(&self, request: &SportsRequest) -> Result<Vec<String>> {
        require_credentials(&request.credentials)?;
        let (session, page) = self.open_authenticated(&request.credentials).await?;
        let result = directory::list_sports(&page).await;
        session.close().await;
        result
    }

    async fn run_list_events(&self, request: &EventsRequest) -> Result<Vec<EventDescriptor>> {
        require_credentials(&request.credentials)?;
        let (session, page) = self.open_authenticated(&request.credentials).await?;
        let result = schedule::list_events(&page, &request.sport).await;
        session.close().await;
        result
    }

    async fn run_submit(&self, request: &SubmitRequest) -> Result<submission::SubmissionReport> {
        require_credentials(&request.credentials)?;
        if request.event_date.split_whitespace().next().is_none() {
            return Err(AppError::InvalidEventDate(request.event_date.clone()));
        }

        let (session, page) = self.open_authenticated(&request.credentials).await?;
        let work = submission::submit(
            &page,
            &self.config,
            &request.sport,
            &request.event_date,
            &request.data,
        );
        let result = match tokio::time::timeout(self.config.submission_timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(AppError::SubmissionTimeout(self.config.submission_timeout)),
        };
        session.close().await;
        result
    }

    /// Acquire a session and log it in. On login failure the session is
    /// closed before the error is returned, so callers never hold a dead
    /// session.
    async fn open_authenticated(
        &self,
        credentials: &Credentials,
    ) -> Result<(PortalSession, PortalPage)> {
        let session = browser::acquire(&self.config).await?;
        let page = PortalPage::new(
            session.page().clone(),
            Locators::default(),
            self.config.element_timeout,
        );
        if let Err(err) = login::authenticate(&page, &self.config, credentials).await {
            session.close().await;
            return Err(err);
        }
        Ok((session, page))
    }

    /// Fire-and-forget audit write; never affects the operation result.
    fn record<Req, Resp>(&self, request_id: &str, principal: &str, request: &Req, response: &Resp)
    where
        Req: serde::Serialize,
        Resp: serde::Serialize,
    {
        let request = serde_json::to_value(request).unwrap_or(JsonValue::Null);
        let response = serde_json::to_value(response).unwrap_or(JsonValue::Null);
        self.audit
            .record(AuditRecord::new(request_id, principal, request, response));
    }
}

/// Boundary validation: reject before any session is acquired.
fn require_credentials(credentials: &Credentials) -> Result<()> {
    if credentials.is_complete() {
        Ok(())
    } else {
        Err(AppError::MissingCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::NoopAuditSink;

    fn automation() -> Automation {
        Automation::new(Config::default(), Arc::new(NoopAuditSink))
    }

    #[test]
    fn test_require_credentials() {
        assert!(require_credentials(&Credentials::new("coach", "pw")).is_ok());
        assert!(matches!(
            require_credentials(&Credentials::new("", "pw")),
            Err(AppError::MissingCredentials)
        ));
    }

    /// Missing credentials are rejected at the boundary: no browser is
    /// launched and the failure payload comes back immediately.
    #[tokio::test]
    async fn test_validation_failure_opens_no_session() {
        let response = automation()
            .list_sports(SportsRequest {
                credentials: Credentials::new("", ""),
                request_id: "req-validation".to_string(),
            })
            .await;
        match response {
            ApiResponse::Err(payload) => {
                assert_eq!(payload.error, "Failed to fetch sports");
                assert!(payload.details.contains("username and password"));
            }
            ApiResponse::Ok(_) => panic!("expected a failure payload"),
        }
    }

    /// A blank event date is rejected before any session is acquired.
    #[tokio::test]
    async fn test_blank_event_date_rejected_at_boundary() {
        let response = automation()
            .submit_results(SubmitRequest {
                credentials: Credentials::new("coach", "pw"),
                sport: "Boys Swimming".to_string(),
                event_date: "   ".to_string(),
                data: Vec::new(),
                request_id: "req-blank-date".to_string(),
            })
            .await;
        match response {
            ApiResponse::Err(payload) => {
                assert_eq!(payload.error, "Failed to submit results");
                assert!(payload.details.contains("searchable tokens"));
            }
            ApiResponse::Ok(_) => panic!("expected a failure payload"),
        }
    }
}
