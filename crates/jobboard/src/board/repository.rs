use chrono::{DateTime, Utc};

use super::applications::{Application, ApplicationEvent, ApplicationId, ApplicationStatus};
use super::identity::{User, UserId};
use super::jobs::{Job, JobId};

/// Storage for registered users.
pub trait UserDirectory: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    fn insert_user(&self, user: User) -> Result<User, RepositoryError>;
    fn update_user(&self, user: User) -> Result<(), RepositoryError>;
    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
}

/// Storage for job postings.
pub trait JobRepository: Send + Sync {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError>;
    fn update_job(&self, job: Job) -> Result<(), RepositoryError>;
    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn all_jobs(&self) -> Result<Vec<Job>, RepositoryError>;
    fn jobs_owned_by(&self, recruiter: &UserId) -> Result<Vec<Job>, RepositoryError>;
    /// Removes the job only while no application references it; otherwise `Conflict`.
    fn delete_job_without_applications(&self, id: &JobId) -> Result<Job, RepositoryError>;
}

/// Storage for applications. Both writes are conditional and evaluated atomically with the
/// check they depend on.
pub trait ApplicationRepository: Send + Sync {
    /// Fails with `Conflict` when an application already exists for the same applicant and job.
    fn insert_unique(&self, application: Application) -> Result<Application, RepositoryError>;
    /// Moves the application to `next` only if it is still in `expected`; otherwise
    /// `StatusMismatch` carrying the status actually stored.
    fn compare_and_set_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<Application, RepositoryError>;
    fn fetch_application(&self, id: &ApplicationId)
        -> Result<Option<Application>, RepositoryError>;
    fn applications_for_jobs(&self, jobs: &[JobId]) -> Result<Vec<Application>, RepositoryError>;
    fn applications_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, RepositoryError>;
}

/// Everything the board services need from one backing store.
pub trait BoardStore: UserDirectory + JobRepository + ApplicationRepository {}

impl<T> BoardStore for T where T: UserDirectory + JobRepository + ApplicationRepository {}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Conflict(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("application is {}, expected another status before moving to {}", actual.label(), requested.label())]
    StatusMismatch {
        actual: ApplicationStatus,
        requested: ApplicationStatus,
    },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for lifecycle notifications (e-mail, webhooks and similar adapters).
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: ApplicationEvent) -> Result<(), PublishError>;
}

/// Event dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}
