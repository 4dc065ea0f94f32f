//! Orchestrator layer: the client-side screen flow contract.

pub mod flow;

pub use flow::{FlowEvent, Screen, SubmissionFlow, TransitionRejected};
