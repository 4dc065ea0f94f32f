//! Client screen flow - orchestration layer.
//!
//! The screen-sequencing state machine the automation operations are driven
//! from: enumerated states, an explicit transition function with guards, and
//! typed rejections for transitions whose preconditions are unmet. Ephemeral
//! credentials and intermediate results live here in memory for the duration
//! of one user session and are discarded on reset.
//!
//! The automation operations are invoked exactly at the `LoadingSport`,
//! `LoadingEvent` and `Submitting` states; their success/failure outcomes
//! decide whether the flow advances or returns to an error-display variant
//! of the step it came from.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Credentials, EventDescriptor, EventsRequest, FailurePayload, RaceResult, SportsRequest,
    SubmitRequest, SubmitResponse,
};

/// The screens one user session moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Upload,
    Edit,
    Login,
    LoadingSport,
    SelectSport,
    LoadingEvent,
    SelectEvent,
    Submitting,
    SubmissionResult,
}

/// Everything that can move the flow forward.
#[derive(Debug, Clone)]
pub enum FlowEvent {
    /// Scanned race results arrived from the upload surface.
    ResultsScanned(Vec<RaceResult>),
    /// The user finished reviewing/correcting the scanned results.
    EditingFinished,
    /// The user submitted the login form.
    CredentialsSubmitted(Credentials),
    SportsLoaded(Vec<String>),
    SportsFailed(FailurePayload),
    SportChosen(String),
    EventsLoaded(Vec<EventDescriptor>),
    EventsFailed(FailurePayload),
    EventChosen(EventDescriptor),
    SubmissionFinished(SubmitResponse),
    /// Try the same event again after a submission attempt.
    Retry,
    /// Back to the start; credentials and selections are discarded.
    Reset,
}

impl FlowEvent {
    fn name(&self) -> &'static str {
        match self {
            FlowEvent::ResultsScanned(_) => "ResultsScanned",
            FlowEvent::EditingFinished => "EditingFinished",
            FlowEvent::CredentialsSubmitted(_) => "CredentialsSubmitted",
            FlowEvent::SportsLoaded(_) => "SportsLoaded",
            FlowEvent::SportsFailed(_) => "SportsFailed",
            FlowEvent::SportChosen(_) => "SportChosen",
            FlowEvent::EventsLoaded(_) => "EventsLoaded",
            FlowEvent::EventsFailed(_) => "EventsFailed",
            FlowEvent::EventChosen(_) => "EventChosen",
            FlowEvent::SubmissionFinished(_) => "SubmissionFinished",
            FlowEvent::Retry => "Retry",
            FlowEvent::Reset => "Reset",
        }
    }
}

/// A transition whose preconditions were unmet, rejected instead of applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event {event} is not valid in state {from:?}")]
pub struct TransitionRejected {
    pub from: Screen,
    pub event: &'static str,
}

/// One user session's flow state.
pub struct SubmissionFlow {
    screen: Screen,
    correlation_id: String,
    credentials: Option<Credentials>,
    race_results: Vec<RaceResult>,
    sports: Vec<String>,
    selected_sport: Option<String>,
    events: Vec<EventDescriptor>,
    selected_event: Option<EventDescriptor>,
    last_failure: Option<FailurePayload>,
    submission: Option<SubmitResponse>,
}

impl SubmissionFlow {
    /// Start a fresh session on the upload screen with a new correlation id.
    pub fn new() -> Self {
        Self {
            screen: Screen::Upload,
            correlation_id: Uuid::new_v4().to_string(),
            credentials: None,
            race_results: Vec::new(),
            sports: Vec::new(),
            selected_sport: None,
            events: Vec::new(),
            selected_event: None,
            last_failure: None,
            submission: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The session's correlation id, reused across all three operations.
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn sports(&self) -> &[String] {
        &self.sports
    }

    pub fn events(&self) -> &[EventDescriptor] {
        &self.events
    }

    pub fn race_results(&self) -> &[RaceResult] {
        &self.race_results
    }

    pub fn selected_event(&self) -> Option<&EventDescriptor> {
        self.selected_event.as_ref()
    }

    /// Failure payload to display on the current screen, if any.
    pub fn last_failure(&self) -> Option<&FailurePayload> {
        self.last_failure.as_ref()
    }

    pub fn submission(&self) -> Option<&SubmitResponse> {
        self.submission.as_ref()
    }

    /// Apply one event. Returns the new screen, or a typed rejection when
    /// the transition's preconditions are unmet; a rejection leaves the flow
    /// unchanged.
    pub fn apply(&mut self, event: FlowEvent) -> Result<Screen, TransitionRejected> {
        let rejected = TransitionRejected {
            from: self.screen,
            event: event.name(),
        };

        match (self.screen, event) {
            (_, FlowEvent::Reset) => self.reset(),

            (Screen::Upload, FlowEvent::ResultsScanned(results)) => {
                self.race_results = results;
                self.screen = Screen::Edit;
            }
            (Screen::Edit, FlowEvent::EditingFinished) => {
                self.screen = Screen::Login;
            }

            (Screen::Login, FlowEvent::CredentialsSubmitted(credentials)) => {
                if !credentials.is_complete() {
                    return Err(rejected);
                }
                self.credentials = Some(credentials);
                self.last_failure = None;
                self.screen = Screen::LoadingSport;
            }
            (Screen::LoadingSport, FlowEvent::SportsLoaded(sports)) => {
                self.sports = sports;
                self.screen = Screen::SelectSport;
            }
            (Screen::LoadingSport, FlowEvent::SportsFailed(failure)) => {
                self.last_failure = Some(failure);
                self.screen = Screen::Login;
            }

            (Screen::SelectSport, FlowEvent::SportChosen(sport)) => {
                // Expired credentials route back to login instead of loading.
                if !self.has_credentials() {
                    self.screen = Screen::Login;
                    return Ok(self.screen);
                }
                self.selected_sport = Some(sport);
                self.selected_event = None;
                self.last_failure = None;
                self.screen = Screen::LoadingEvent;
            }
            (Screen::LoadingEvent, FlowEvent::EventsLoaded(events)) => {
                self.events = events;
                self.screen = Screen::SelectEvent;
            }
            (Screen::LoadingEvent, FlowEvent::EventsFailed(failure)) => {
                self.last_failure = Some(failure);
                self.screen = Screen::SelectSport;
            }

            (Screen::SelectEvent, FlowEvent::EventChosen(event)) => {
                if !self.has_credentials() || self.race_results.is_empty() {
                    return Err(rejected);
                }
                self.selected_event = Some(event);
                self.screen = Screen::Submitting;
            }
            (Screen::Submitting, FlowEvent::SubmissionFinished(response)) => {
                self.submission = Some(response);
                self.screen = Screen::SubmissionResult;
            }
            (Screen::SubmissionResult, FlowEvent::Retry) => {
                self.submission = None;
                self.screen = Screen::SelectEvent;
            }

            _ => return Err(rejected),
        }

        Ok(self.screen)
    }

    /// Request for the directory operation; available while loading sports.
    pub fn sports_request(&self) -> Option<SportsRequest> {
        if self.screen != Screen::LoadingSport {
            return None;
        }
        Some(SportsRequest {
            credentials: self.credentials.clone()?,
            request_id: self.correlation_id.clone(),
        })
    }

    /// Request for the schedule operation; available while loading events.
    pub fn events_request(&self) -> Option<EventsRequest> {
        if self.screen != Screen::LoadingEvent {
            return None;
        }
        Some(EventsRequest {
            credentials: self.credentials.clone()?,
            sport: self.selected_sport.clone()?,
            request_id: self.correlation_id.clone(),
        })
    }

    /// Request for the submission operation; available while submitting.
    pub fn submit_request(&self) -> Option<SubmitRequest> {
        if self.screen != Screen::Submitting {
            return None;
        }
        Some(SubmitRequest {
            credentials: self.credentials.clone()?,
            sport: self.selected_sport.clone()?,
            event_date: self.selected_event.as_ref()?.date.clone(),
            data: self.race_results.clone(),
            request_id: self.correlation_id.clone(),
        })
    }

    fn has_credentials(&self) -> bool {
        self.credentials.as_ref().is_some_and(Credentials::is_complete)
    }

    /// Discard everything and mint a new correlation id: a reset starts a
    /// new user session.
    fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiResponse, RaceType, ResultItem, SubmitOutcome};

    fn scanned_results() -> Vec<RaceResult> {
        vec![RaceResult {
            race: RaceType::Free50,
            results: vec![ResultItem {
                swimmers: vec!["John Smith".to_string()],
                place: 1,
                time: "23.45".to_string(),
            }],
        }]
    }

    fn event() -> EventDescriptor {
        EventDescriptor {
            date: "12/4 4:00pm".to_string(),
            result: String::new(),
            opponent: "Robbinsville".to_string(),
        }
    }

    fn flow_at_select_event() -> SubmissionFlow {
        let mut flow = SubmissionFlow::new();
        flow.apply(FlowEvent::ResultsScanned(scanned_results())).unwrap();
        flow.apply(FlowEvent::EditingFinished).unwrap();
        flow.apply(FlowEvent::CredentialsSubmitted(Credentials::new("coach", "pw")))
            .unwrap();
        flow.apply(FlowEvent::SportsLoaded(vec!["Boys Swimming".to_string()]))
            .unwrap();
        flow.apply(FlowEvent::SportChosen("Boys Swimming".to_string()))
            .unwrap();
        flow.apply(FlowEvent::EventsLoaded(vec![event()])).unwrap();
        flow
    }

    #[test]
    fn test_happy_path_reaches_submission_result() {
        let mut flow = flow_at_select_event();
        assert_eq!(flow.screen(), Screen::SelectEvent);

        flow.apply(FlowEvent::EventChosen(event())).unwrap();
        assert_eq!(flow.screen(), Screen::Submitting);
        let request = flow.submit_request().unwrap();
        assert_eq!(request.event_date, "12/4 4:00pm");
        assert_eq!(request.request_id, flow.correlation_id());

        flow.apply(FlowEvent::SubmissionFinished(ApiResponse::Ok(SubmitOutcome::ok(
            Vec::new(),
        ))))
        .unwrap();
        assert_eq!(flow.screen(), Screen::SubmissionResult);
    }

    #[test]
    fn test_login_requires_nonempty_credentials() {
        let mut flow = SubmissionFlow::new();
        flow.apply(FlowEvent::ResultsScanned(scanned_results())).unwrap();
        flow.apply(FlowEvent::EditingFinished).unwrap();

        let rejection = flow
            .apply(FlowEvent::CredentialsSubmitted(Credentials::new("", "")))
            .unwrap_err();
        assert_eq!(rejection.from, Screen::Login);
        assert_eq!(flow.screen(), Screen::Login);
    }

    #[test]
    fn test_sports_failure_returns_to_login_with_error() {
        let mut flow = SubmissionFlow::new();
        flow.apply(FlowEvent::ResultsScanned(scanned_results())).unwrap();
        flow.apply(FlowEvent::EditingFinished).unwrap();
        flow.apply(FlowEvent::CredentialsSubmitted(Credentials::new("coach", "pw")))
            .unwrap();
        assert!(flow.sports_request().is_some());

        flow.apply(FlowEvent::SportsFailed(FailurePayload::new(
            "Failed to fetch sports",
            "login was not confirmed within 10s",
        )))
        .unwrap();
        assert_eq!(flow.screen(), Screen::Login);
        assert!(flow.last_failure().is_some());
    }

    #[test]
    fn test_events_failure_returns_to_sport_selection() {
        let mut flow = SubmissionFlow::new();
        flow.apply(FlowEvent::ResultsScanned(scanned_results())).unwrap();
        flow.apply(FlowEvent::EditingFinished).unwrap();
        flow.apply(FlowEvent::CredentialsSubmitted(Credentials::new("coach", "pw")))
            .unwrap();
        flow.apply(FlowEvent::SportsLoaded(vec!["Boys Swimming".to_string()]))
            .unwrap();
        flow.apply(FlowEvent::SportChosen("Boys Swimming".to_string()))
            .unwrap();
        assert!(flow.events_request().is_some());

        flow.apply(FlowEvent::EventsFailed(FailurePayload::new(
            "Failed to fetch events",
            "sport not found",
        )))
        .unwrap();
        assert_eq!(flow.screen(), Screen::SelectSport);
        assert!(flow.last_failure().is_some());
    }

    #[test]
    fn test_sport_chosen_without_credentials_routes_to_login() {
        let mut flow = SubmissionFlow::new();
        flow.apply(FlowEvent::ResultsScanned(scanned_results())).unwrap();
        flow.apply(FlowEvent::EditingFinished).unwrap();
        flow.apply(FlowEvent::CredentialsSubmitted(Credentials::new("coach", "pw")))
            .unwrap();
        flow.apply(FlowEvent::SportsLoaded(vec!["Boys Swimming".to_string()]))
            .unwrap();
        flow.credentials = None;
        let screen = flow
            .apply(FlowEvent::SportChosen("Boys Swimming".to_string()))
            .unwrap();
        assert_eq!(screen, Screen::Login);
    }

    #[test]
    fn test_event_chosen_requires_results_and_credentials() {
        let mut flow = flow_at_select_event();
        flow.race_results.clear();
        let rejection = flow.apply(FlowEvent::EventChosen(event())).unwrap_err();
        assert_eq!(rejection.from, Screen::SelectEvent);
        assert_eq!(flow.screen(), Screen::SelectEvent);
    }

    #[test]
    fn test_retry_returns_to_select_event() {
        let mut flow = flow_at_select_event();
        flow.apply(FlowEvent::EventChosen(event())).unwrap();
        flow.apply(FlowEvent::SubmissionFinished(ApiResponse::Err(
            FailurePayload::new("Failed to submit results", "event not found"),
        )))
        .unwrap();
        assert_eq!(flow.screen(), Screen::SubmissionResult);

        flow.apply(FlowEvent::Retry).unwrap();
        assert_eq!(flow.screen(), Screen::SelectEvent);
        assert!(flow.submission().is_none());
    }

    #[test]
    fn test_reset_discards_session_and_mints_new_correlation_id() {
        let mut flow = flow_at_select_event();
        let old_id = flow.correlation_id().to_string();

        flow.apply(FlowEvent::Reset).unwrap();
        assert_eq!(flow.screen(), Screen::Upload);
        assert!(flow.race_results().is_empty());
        assert!(flow.sports().is_empty());
        assert_ne!(flow.correlation_id(), old_id);
    }

    #[test]
    fn test_out_of_order_events_are_rejected() {
        let mut flow = SubmissionFlow::new();
        assert!(flow.apply(FlowEvent::EventChosen(event())).is_err());
        assert!(flow.apply(FlowEvent::Retry).is_err());
        assert!(flow
            .apply(FlowEvent::SportsLoaded(vec!["Boys Swimming".to_string()]))
            .is_err());
        assert_eq!(flow.screen(), Screen::Upload);
    }

    #[test]
    fn test_requests_only_available_in_loading_states() {
        let flow = flow_at_select_event();
        assert!(flow.sports_request().is_none());
        assert!(flow.events_request().is_none());
        assert!(flow.submit_request().is_none());
    }
}
