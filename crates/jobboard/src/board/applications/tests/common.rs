use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::board::applications::domain::{
    ApplicantSummary, Application, ApplicationEvent, ApplicationId, ApplicationListing,
    ApplicationStatus, JobSummary,
};
use crate::board::applications::{application_router, ApplicationService};
use crate::board::identity::{Actor, Applicant, Recruiter, Role, User, UserId, UserProfile};
use crate::board::jobs::{Job, JobId};
use crate::board::memory::InMemoryBoardStore;
use crate::board::repository::{EventPublisher, JobRepository, PublishError, UserDirectory};
use crate::config::StoreConfig;

pub(super) type Service = ApplicationService<InMemoryBoardStore, MemoryEvents>;

pub(super) fn build_service() -> (Service, Arc<InMemoryBoardStore>, Arc<MemoryEvents>) {
    let store = Arc::new(InMemoryBoardStore::default());
    let events = Arc::new(MemoryEvents::default());
    let service = ApplicationService::new(store.clone(), events.clone());
    (service, store, events)
}

pub(super) fn build_service_with_timeout(
    timeout: Duration,
) -> (Service, Arc<InMemoryBoardStore>) {
    let store = Arc::new(InMemoryBoardStore::new(StoreConfig {
        operation_timeout: timeout,
    }));
    let service = ApplicationService::new(store.clone(), Arc::new(MemoryEvents::default()));
    (service, store)
}

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn user(id: &str, name: &str, role: Role) -> User {
    User {
        id: UserId(id.to_string()),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        role,
        profile: UserProfile {
            resume: Some(format!("https://blobs.example.com/resumes/{id}.pdf")),
            bio: None,
        },
        created_at: at(1, 9),
    }
}

pub(super) fn recruiter(store: &InMemoryBoardStore, id: &str) -> Recruiter {
    let stored = store
        .insert_user(user(id, &format!("Recruiter {id}"), Role::Recruiter))
        .expect("recruiter registered");
    match Actor::from_user(&stored) {
        Actor::Recruiter(recruiter) => recruiter,
        Actor::Applicant(_) => panic!("expected recruiter"),
    }
}

pub(super) fn applicant(store: &InMemoryBoardStore, id: &str, name: &str) -> Applicant {
    let stored = store
        .insert_user(user(id, name, Role::Applicant))
        .expect("applicant registered");
    match Actor::from_user(&stored) {
        Actor::Applicant(applicant) => applicant,
        Actor::Recruiter(_) => panic!("expected applicant"),
    }
}

pub(super) fn job(store: &InMemoryBoardStore, id: &str, title: &str, owner: &Recruiter) -> JobId {
    store
        .insert_job(Job {
            id: JobId(id.to_string()),
            title: title.to_string(),
            description: format!("{title} role"),
            recruiter_id: owner.id().clone(),
            created_at: at(2, 9),
        })
        .expect("job stored")
        .id
}

/// Listing fixture for pure filter/sort checks.
pub(super) fn listing(
    id: &str,
    status: ApplicationStatus,
    applied_day: u32,
    name: Option<&str>,
    email: Option<&str>,
    job_title: Option<&str>,
) -> ApplicationListing {
    let applied_at = at(applied_day, 12);
    ApplicationListing {
        application: Application {
            id: ApplicationId(id.to_string()),
            applicant_id: UserId(format!("usr-{id}")),
            job_id: JobId(format!("job-{id}")),
            status,
            cover_letter: None,
            phone: None,
            name: None,
            applied_at,
            status_changed_at: applied_at,
        },
        job: Some(JobSummary {
            id: JobId(format!("job-{id}")),
            title: job_title.map(str::to_string),
        }),
        applicant: Some(ApplicantSummary {
            id: UserId(format!("usr-{id}")),
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            resume: None,
        }),
    }
}

pub(super) fn sample_listings() -> Vec<ApplicationListing> {
    vec![
        listing(
            "a",
            ApplicationStatus::Pending,
            10,
            Some("Bob Stone"),
            Some("bob@mail.test"),
            Some("Platform Engineer"),
        ),
        listing(
            "b",
            ApplicationStatus::Approved,
            12,
            Some("Amy Lee"),
            Some("amy@mail.test"),
            Some("Data Analyst"),
        ),
        listing(
            "c",
            ApplicationStatus::Rejected,
            8,
            None,
            Some("ghost@mail.test"),
            Some("Platform Engineer"),
        ),
        listing(
            "d",
            ApplicationStatus::Pending,
            14,
            Some("carl jones"),
            None,
            None,
        ),
        listing(
            "e",
            ApplicationStatus::Hired,
            11,
            Some("Dana Platt"),
            Some("dana@mail.test"),
            Some("Support Lead"),
        ),
    ]
}

pub(super) fn ids(listings: &[&ApplicationListing]) -> Vec<String> {
    listings
        .iter()
        .map(|listing| listing.application.id.0.clone())
        .collect()
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    events: Arc<Mutex<Vec<ApplicationEvent>>>,
}

impl MemoryEvents {
    pub(super) fn events(&self) -> Vec<ApplicationEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

impl EventPublisher for MemoryEvents {
    fn publish(&self, event: ApplicationEvent) -> Result<(), PublishError> {
        self.events
            .lock()
            .expect("event mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct FailingEvents;

impl EventPublisher for FailingEvents {
    fn publish(&self, _event: ApplicationEvent) -> Result<(), PublishError> {
        Err(PublishError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) fn router_with_service(service: Service) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
