pub mod api;
pub mod credentials;
pub mod event;
pub mod race;

pub use api::{
    ApiResponse, EventsRequest, EventsResponse, FailurePayload, SportsRequest, SportsResponse,
    SubmitOutcome, SubmitRequest, SubmitResponse,
};
pub use credentials::Credentials;
pub use event::EventDescriptor;
pub use race::{RaceResult, RaceType, ResultItem};
