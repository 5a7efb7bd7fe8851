//! Job board domain: identities, job postings and the application workflow.

pub mod applications;
pub mod error;
pub mod identity;
pub mod jobs;
pub mod memory;
pub mod repository;
pub mod routes;

use std::sync::atomic::{AtomicU64, Ordering};

pub use error::BoardError;
pub use identity::{AccountService, Actor, Applicant, Recruiter, Registration, Role, User, UserId};
pub use jobs::{Job, JobDraft, JobId, JobService};
pub use memory::InMemoryBoardStore;
pub use repository::{
    ApplicationRepository, BoardStore, EventPublisher, JobRepository, PublishError,
    RepositoryError, UserDirectory,
};
pub use routes::{account_router, job_router};

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Runs a store-bound board call on tokio's blocking pool and awaits its result.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, BoardError>
where
    F: FnOnce() -> Result<T, BoardError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|error| BoardError::Unavailable(format!("board worker failed: {error}")))?
}

fn next_id(prefix: &str, sequence: &AtomicU64) -> String {
    let id = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}
