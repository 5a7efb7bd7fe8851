use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
#[cfg(test)]
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};

use super::applications::{Application, ApplicationId, ApplicationStatus};
use super::identity::{User, UserId};
use super::jobs::{Job, JobId};
use super::repository::{
    ApplicationRepository, JobRepository, RepositoryError, UserDirectory,
};
use crate::config::StoreConfig;

#[derive(Debug, Default)]
struct BoardState {
    users: BTreeMap<UserId, User>,
    emails: HashMap<String, UserId>,
    jobs: BTreeMap<JobId, Job>,
    applications: BTreeMap<ApplicationId, Application>,
    by_applicant_and_job: HashMap<(UserId, JobId), ApplicationId>,
}

/// Process-local store backing every board repository with one lock, so each conditional
/// write is checked and applied in the same critical section.
#[derive(Debug, Clone)]
pub struct InMemoryBoardStore {
    state: Arc<Mutex<BoardState>>,
    timeout: Duration,
}

impl Default for InMemoryBoardStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl InMemoryBoardStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(BoardState::default())),
            timeout: config.operation_timeout,
        }
    }

    /// Acquire the state lock, giving up with `Unavailable` once the operation timeout passes.
    fn lock(&self) -> Result<MutexGuard<'_, BoardState>, RepositoryError> {
        self.state.try_lock_for(self.timeout).ok_or_else(|| {
            RepositoryError::Unavailable(format!(
                "store busy for longer than {} ms",
                self.timeout.as_millis()
            ))
        })
    }

    /// Hold the store lock for `hold`, simulating a stalled writer.
    #[cfg(test)]
    pub(crate) fn stall_for(&self, hold: Duration) -> thread::JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let (ready_tx, ready_rx) = std::sync::mpsc::channel();
        let handle = thread::spawn(move || {
            let _guard = state.lock();
            let _ = ready_tx.send(());
            thread::sleep(hold);
        });
        let _ = ready_rx.recv();
        handle
    }
}

impl UserDirectory for InMemoryBoardStore {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut state = self.lock()?;
        if state.users.contains_key(&user.id) {
            return Err(RepositoryError::Conflict(format!(
                "user {} already exists",
                user.id.0
            )));
        }
        if state.emails.contains_key(&user.email) {
            return Err(RepositoryError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }
        state.emails.insert(user.email.clone(), user.id.clone());
        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn update_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        let previous_email = match state.users.get(&user.id) {
            Some(existing) => existing.email.clone(),
            None => {
                return Err(RepositoryError::NotFound {
                    entity: "user",
                    id: user.id.0,
                })
            }
        };
        if previous_email != user.email {
            if state.emails.contains_key(&user.email) {
                return Err(RepositoryError::Conflict(format!(
                    "email {} is already registered",
                    user.email
                )));
            }
            state.emails.remove(&previous_email);
            state.emails.insert(user.email.clone(), user.id.clone());
        }
        state.users.insert(user.id.clone(), user);
        Ok(())
    }

    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.users.get(id).cloned())
    }
}

impl JobRepository for InMemoryBoardStore {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut state = self.lock()?;
        if state.jobs.contains_key(&job.id) {
            return Err(RepositoryError::Conflict(format!(
                "job {} already exists",
                job.id.0
            )));
        }
        state.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update_job(&self, job: Job) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        match state.jobs.get_mut(&job.id) {
            Some(slot) => {
                *slot = job;
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "job",
                id: job.id.0,
            }),
        }
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.lock()?.jobs.get(id).cloned())
    }

    fn all_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.lock()?.jobs.values().cloned().collect())
    }

    fn jobs_owned_by(&self, recruiter: &UserId) -> Result<Vec<Job>, RepositoryError> {
        Ok(self
            .lock()?
            .jobs
            .values()
            .filter(|job| &job.recruiter_id == recruiter)
            .cloned()
            .collect())
    }

    fn delete_job_without_applications(&self, id: &JobId) -> Result<Job, RepositoryError> {
        let mut state = self.lock()?;
        if !state.jobs.contains_key(id) {
            return Err(RepositoryError::NotFound {
                entity: "job",
                id: id.0.clone(),
            });
        }
        let referenced = state
            .applications
            .values()
            .filter(|application| &application.job_id == id)
            .count();
        if referenced > 0 {
            return Err(RepositoryError::Conflict(format!(
                "job {} has {referenced} application(s) and cannot be deleted",
                id.0
            )));
        }
        state.jobs.remove(id).ok_or_else(|| RepositoryError::NotFound {
            entity: "job",
            id: id.0.clone(),
        })
    }
}

impl ApplicationRepository for InMemoryBoardStore {
    fn insert_unique(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut state = self.lock()?;
        if !state.jobs.contains_key(&application.job_id) {
            return Err(RepositoryError::NotFound {
                entity: "job",
                id: application.job_id.0,
            });
        }
        let key = (application.applicant_id.clone(), application.job_id.clone());
        if state.by_applicant_and_job.contains_key(&key) {
            return Err(RepositoryError::Conflict(format!(
                "applicant {} has already applied to job {}",
                key.0 .0, key.1 .0
            )));
        }
        if state.applications.contains_key(&application.id) {
            return Err(RepositoryError::Conflict(format!(
                "application {} already exists",
                application.id.0
            )));
        }
        state
            .by_applicant_and_job
            .insert(key, application.id.clone());
        state
            .applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn compare_and_set_status(
        &self,
        id: &ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
        at: DateTime<Utc>,
    ) -> Result<Application, RepositoryError> {
        let mut state = self.lock()?;
        let application =
            state
                .applications
                .get_mut(id)
                .ok_or_else(|| RepositoryError::NotFound {
                    entity: "application",
                    id: id.0.clone(),
                })?;
        if application.status != expected {
            return Err(RepositoryError::StatusMismatch {
                actual: application.status,
                requested: next,
            });
        }
        application.status = next;
        application.status_changed_at = at;
        Ok(application.clone())
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(self.lock()?.applications.get(id).cloned())
    }

    fn applications_for_jobs(&self, jobs: &[JobId]) -> Result<Vec<Application>, RepositoryError> {
        Ok(self
            .lock()?
            .applications
            .values()
            .filter(|application| jobs.contains(&application.job_id))
            .cloned()
            .collect())
    }

    fn applications_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        Ok(self
            .lock()?
            .applications
            .values()
            .filter(|application| &application.applicant_id == applicant)
            .cloned()
            .collect())
    }
}
