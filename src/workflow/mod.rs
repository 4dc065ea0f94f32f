//! Workflow layer: the three automation operations.

pub mod automation;

pub use automation::Automation;
