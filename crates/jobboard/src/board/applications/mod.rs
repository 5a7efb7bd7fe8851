//! Application lifecycle, recruiter-scoped queries and the review view built on them.

pub mod domain;
pub mod lifecycle;
pub mod query;
pub mod review;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantSummary, Application, ApplicationEvent, ApplicationId, ApplicationListing,
    ApplicationPayload, ApplicationStatus, JobSummary, StatusTone, UnknownStatus,
};
pub use lifecycle::{allowed_transitions, can_transition, ensure_transition, is_terminal};
pub use query::{ReviewQuery, SortKey, StatusFilter, UnknownSortKey};
pub use review::{ApplicationCard, ApplicationDetail, EmptyState, ReviewSession};
pub use router::{application_router, ApplicationsResponse, SubmitRequest, TransitionRequest};
pub use service::ApplicationService;
