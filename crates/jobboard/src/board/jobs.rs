use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::BoardError;
use super::identity::{resolve_actor, Actor, Recruiter, UserId};
use super::repository::{JobRepository, UserDirectory};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// A posting owned by exactly one recruiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub recruiter_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn is_owned_by(&self, recruiter: &Recruiter) -> bool {
        &self.recruiter_id == recruiter.id()
    }
}

/// Editable job fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl JobDraft {
    fn validated(self) -> Result<Self, BoardError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(BoardError::Validation(
                "job title must not be empty".to_string(),
            ));
        }
        Ok(Self {
            title,
            description: self.description.trim().to_string(),
        })
    }
}

/// Posting, editing and removal of jobs. Mutations are restricted to the owning recruiter.
pub struct JobService<S> {
    store: Arc<S>,
}

impl<S> JobService<S>
where
    S: JobRepository + UserDirectory + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn actor(&self, user_id: &UserId) -> Result<Actor, BoardError> {
        resolve_actor(self.store.as_ref(), user_id)
    }

    pub fn post(&self, recruiter: &Recruiter, draft: JobDraft) -> Result<Job, BoardError> {
        let draft = draft.validated()?;
        let job = Job {
            id: JobId(super::next_id("job", &super::JOB_SEQUENCE)),
            title: draft.title,
            description: draft.description,
            recruiter_id: recruiter.id().clone(),
            created_at: Utc::now(),
        };

        let stored = self.store.insert_job(job)?;
        info!(job_id = %stored.id.0, recruiter_id = %stored.recruiter_id.0, "job posted");
        Ok(stored)
    }

    /// All postings, newest first.
    pub fn list(&self) -> Result<Vec<Job>, BoardError> {
        let mut jobs = self.store.all_jobs()?;
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    pub fn get(&self, job_id: &JobId) -> Result<Job, BoardError> {
        self.store
            .fetch_job(job_id)?
            .ok_or_else(|| BoardError::not_found("job", &job_id.0))
    }

    pub fn update(
        &self,
        recruiter: &Recruiter,
        job_id: &JobId,
        draft: JobDraft,
    ) -> Result<Job, BoardError> {
        let draft = draft.validated()?;
        let mut job = self.owned(recruiter, job_id)?;
        job.title = draft.title;
        job.description = draft.description;
        self.store.update_job(job.clone())?;
        Ok(job)
    }

    /// Jobs with applications are kept; removing them would orphan the applicants' records.
    pub fn delete(&self, recruiter: &Recruiter, job_id: &JobId) -> Result<Job, BoardError> {
        self.owned(recruiter, job_id)?;
        let removed = self.store.delete_job_without_applications(job_id)?;
        info!(job_id = %removed.id.0, "job deleted");
        Ok(removed)
    }

    fn owned(&self, recruiter: &Recruiter, job_id: &JobId) -> Result<Job, BoardError> {
        let job = self.get(job_id)?;
        if !job.is_owned_by(recruiter) {
            warn!(job_id = %job_id.0, recruiter_id = %recruiter.id().0, "job mutation by non-owner");
            return Err(BoardError::Authorization(format!(
                "job {} belongs to another recruiter",
                job_id.0
            )));
        }
        Ok(job)
    }
}
