//! Application error taxonomy.
//!
//! Every failure inside one automation call is caught at that call's boundary
//! and translated into the wire failure payload; nothing propagates further.
//! Validation errors are raised before any browser session is acquired.

use std::time::Duration;

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing username or password, caught before any session is opened.
    #[error("username and password are required")]
    MissingCredentials,

    /// Event date with no searchable tokens, caught before any session is
    /// opened.
    #[error("event date {0:?} contains no searchable tokens")]
    InvalidEventDate(String),

    /// The post-login marker never appeared. Bad credentials, changed portal
    /// markup and a slow network all collapse into this one error.
    #[error("login was not confirmed within {timeout:?}")]
    AuthenticationFailed { timeout: Duration },

    /// No category card matched the requested sport. Fatal, aborts the call.
    #[error("sport not found: {0:?}")]
    SportNotFound(String),

    /// No schedule row matched the event date. Fatal, aborts the call before
    /// any lane is written.
    #[error("no scheduled event matches {0:?}")]
    EventNotFound(String),

    /// Browser launch configuration was rejected.
    #[error("failed to prepare browser session: {0}")]
    SessionSetup(String),

    /// The pinned browser build could not be fetched. Fatal for the call.
    #[error("failed to fetch the pinned browser build: {0}")]
    BrowserFetch(#[source] chromiumoxide::fetcher::FetcherError),

    /// Bounded element wait elapsed.
    #[error("element {selector:?} did not appear within {timeout:?}")]
    ElementWait { selector: String, timeout: Duration },

    /// An element the flow depends on is absent from the current markup.
    #[error("portal markup is missing {0}")]
    MarkupMissing(String),

    /// The overall bound on the submission call elapsed.
    #[error("submission did not finish within {0:?}")]
    SubmissionTimeout(Duration),

    /// Raw protocol failure from the browser.
    #[error("browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// True for errors reported at the boundary before a session exists.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::MissingCredentials | AppError::InvalidEventDate(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(AppError::MissingCredentials.is_validation());
        assert!(AppError::InvalidEventDate(String::new()).is_validation());
        assert!(!AppError::SportNotFound("Chess".to_string()).is_validation());
        assert!(!AppError::AuthenticationFailed {
            timeout: Duration::from_secs(10)
        }
        .is_validation());
    }
}
