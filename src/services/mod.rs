pub mod directory;
pub mod format;
pub mod locators;
pub mod login;
pub mod schedule;
pub mod submission;

pub use locators::Locators;
pub use submission::SubmissionReport;
