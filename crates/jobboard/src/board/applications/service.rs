use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    ApplicantSummary, Application, ApplicationEvent, ApplicationId, ApplicationListing,
    ApplicationPayload, ApplicationStatus, JobSummary,
};
use super::lifecycle::{ensure_transition, INITIAL_STATUS};
use super::query::{ReviewQuery, SortKey};
use crate::board::error::BoardError;
use crate::board::identity::{resolve_actor, Actor, Applicant, Recruiter, Role, UserId};
use crate::board::jobs::{Job, JobId};
use crate::board::repository::{BoardStore, EventPublisher};

/// Lifecycle engine and recruiter-scoped query service over one backing store.
pub struct ApplicationService<S, E> {
    store: Arc<S>,
    events: Arc<E>,
}

fn next_application_id() -> ApplicationId {
    ApplicationId(crate::board::next_id(
        "app",
        &crate::board::APPLICATION_SEQUENCE,
    ))
}

impl<S, E> ApplicationService<S, E>
where
    S: BoardStore + 'static,
    E: EventPublisher + 'static,
{
    pub fn new(store: Arc<S>, events: Arc<E>) -> Self {
        Self { store, events }
    }

    pub fn actor(&self, user_id: &UserId) -> Result<Actor, BoardError> {
        resolve_actor(self.store.as_ref(), user_id)
    }

    /// Submit an application for `job_id`. At most one application exists per applicant and job.
    pub fn submit(
        &self,
        applicant: &Applicant,
        job_id: &JobId,
        payload: ApplicationPayload,
    ) -> Result<Application, BoardError> {
        let user = self
            .store
            .fetch_user(applicant.id())?
            .ok_or_else(|| BoardError::not_found("user", &applicant.id().0))?;
        if user.role != Role::Applicant {
            return Err(BoardError::Authorization(format!(
                "user {} cannot apply to jobs",
                user.id.0
            )));
        }

        self.store
            .fetch_job(job_id)?
            .ok_or_else(|| BoardError::not_found("job", &job_id.0))?;

        let payload = payload.normalized();
        let now = Utc::now();
        let application = Application {
            id: next_application_id(),
            applicant_id: applicant.id().clone(),
            job_id: job_id.clone(),
            status: INITIAL_STATUS,
            cover_letter: payload.cover_letter,
            phone: payload.phone,
            name: payload.name,
            applied_at: now,
            status_changed_at: now,
        };

        let stored = self.store.insert_unique(application)?;
        info!(
            application_id = %stored.id.0,
            job_id = %stored.job_id.0,
            applicant_id = %stored.applicant_id.0,
            "application submitted"
        );

        self.emit(ApplicationEvent::Submitted {
            application_id: stored.id.clone(),
            job_id: stored.job_id.clone(),
            applicant_id: stored.applicant_id.clone(),
            at: stored.applied_at,
        });

        Ok(stored)
    }

    /// Move an application to `next`. Only the recruiter owning the application's job may do so,
    /// and only along the transition table.
    pub fn transition(
        &self,
        recruiter: &Recruiter,
        application_id: &ApplicationId,
        next: ApplicationStatus,
    ) -> Result<Application, BoardError> {
        let current = self.owned_application(recruiter, application_id)?;
        ensure_transition(current.status, next)?;

        let updated = self.store.compare_and_set_status(
            application_id,
            current.status,
            next,
            Utc::now(),
        )?;

        info!(
            application_id = %updated.id.0,
            from = current.status.label(),
            to = updated.status.label(),
            recruiter_id = %recruiter.id().0,
            "application status changed"
        );

        self.emit(ApplicationEvent::StatusChanged {
            application_id: updated.id.clone(),
            from: current.status,
            to: updated.status,
            changed_by: recruiter.id().clone(),
            at: updated.status_changed_at,
        });

        Ok(updated)
    }

    /// Applications on jobs owned by `recruiter`, enriched and narrowed by `query`.
    pub fn list_for_recruiter(
        &self,
        recruiter: &Recruiter,
        query: &ReviewQuery,
    ) -> Result<Vec<ApplicationListing>, BoardError> {
        let jobs: HashMap<JobId, Job> = self
            .store
            .jobs_owned_by(recruiter.id())?
            .into_iter()
            .filter(|job| job.is_owned_by(recruiter))
            .map(|job| (job.id.clone(), job))
            .collect();
        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        let job_ids: Vec<JobId> = jobs.keys().cloned().collect();
        let listings = self
            .store
            .applications_for_jobs(&job_ids)?
            .into_iter()
            .filter_map(|application| {
                let job = jobs.get(&application.job_id)?;
                Some(self.enrich(application, job))
            })
            .collect::<Result<Vec<_>, BoardError>>()?;

        Ok(query.apply_owned(listings))
    }

    /// A single application for the detail drill-down, subject to the same ownership rule.
    pub fn get_for_recruiter(
        &self,
        recruiter: &Recruiter,
        application_id: &ApplicationId,
    ) -> Result<ApplicationListing, BoardError> {
        let application = self.owned_application(recruiter, application_id)?;
        let job = self
            .store
            .fetch_job(&application.job_id)?
            .ok_or_else(|| BoardError::not_found("job", &application.job_id.0))?;
        self.enrich(application, &job)
    }

    /// The caller's own applications with job details, newest first.
    pub fn list_for_applicant(
        &self,
        applicant: &Applicant,
    ) -> Result<Vec<ApplicationListing>, BoardError> {
        let applications = self.store.applications_by_applicant(applicant.id())?;
        let mut listings = Vec::with_capacity(applications.len());
        for application in applications {
            let job = self.store.fetch_job(&application.job_id)?;
            listings.push(ApplicationListing {
                job: job.as_ref().map(JobSummary::from),
                applicant: None,
                application,
            });
        }
        Ok(ReviewQuery::default().sort(SortKey::Newest).apply_owned(listings))
    }

    fn owned_application(
        &self,
        recruiter: &Recruiter,
        application_id: &ApplicationId,
    ) -> Result<Application, BoardError> {
        let application = self
            .store
            .fetch_application(application_id)?
            .ok_or_else(|| BoardError::not_found("application", &application_id.0))?;

        let owned = self
            .store
            .fetch_job(&application.job_id)?
            .map(|job| job.is_owned_by(recruiter))
            .unwrap_or(false);
        if !owned {
            warn!(
                application_id = %application_id.0,
                recruiter_id = %recruiter.id().0,
                "application access by recruiter who does not own the job"
            );
            return Err(BoardError::Authorization(format!(
                "application {} is not on a job owned by {}",
                application_id.0,
                recruiter.id().0
            )));
        }

        Ok(application)
    }

    fn enrich(&self, application: Application, job: &Job) -> Result<ApplicationListing, BoardError> {
        let applicant = self.store.fetch_user(&application.applicant_id)?;
        Ok(ApplicationListing {
            job: Some(JobSummary::from(job)),
            applicant: applicant.as_ref().map(ApplicantSummary::from),
            application,
        })
    }

    fn emit(&self, event: ApplicationEvent) {
        if let Err(error) = self.events.publish(event.clone()) {
            warn!(
                application_id = %event.application_id().0,
                template = event.template(),
                %error,
                "lifecycle event not delivered"
            );
        }
    }
}
