//! # Swim Result Submit
//!
//! Automates a scheduling portal that exposes no programmatic API: logs in
//! as a coach account, scrapes the account's sports and scheduled events,
//! and drives the portal's multi-screen result-entry form to submit race
//! results section by section, lane by lane.
//!
//! ## Architecture
//!
//! Layered, leaves first:
//!
//! - `browser/` - session provider; owns the browser process (visible local
//!   or headless with a pinned, fetched build)
//! - `infrastructure/` - `PortalPage`, the only owner of the CDP page;
//!   exposes navigation, bounded waits and input primitives
//! - `services/` - one portal capability per module: login, directory,
//!   schedule, submission, plus the locator table and pure text transforms
//! - `workflow/` - the three boundary operations; each acquires, drives and
//!   releases one session and writes one audit record
//! - `orchestrator/` - the client-side screen state machine the operations
//!   are sequenced from

pub mod audit;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

pub use audit::{AuditRecord, AuditSink, FileAuditSink, NoopAuditSink};
pub use config::Config;
pub use error::{AppError, Result};
pub use infrastructure::PortalPage;
pub use models::{
    ApiResponse, Credentials, EventDescriptor, EventsRequest, FailurePayload, RaceResult,
    RaceType, ResultItem, SportsRequest, SubmitOutcome, SubmitRequest,
};
pub use orchestrator::{FlowEvent, Screen, SubmissionFlow};
pub use workflow::Automation;
