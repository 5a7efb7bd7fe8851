use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::error::BoardError;
use super::identity::{session_user_id, AccountService, Registration};
use super::jobs::{JobDraft, JobId, JobService};
use super::repository::{JobRepository, UserDirectory};
use super::run_blocking;

/// Public job listing plus recruiter-only posting maintenance.
pub fn job_router<S>(service: Arc<JobService<S>>) -> Router
where
    S: JobRepository + UserDirectory + 'static,
{
    Router::new()
        .route(
            "/api/jobs",
            get(list_jobs_handler::<S>).post(post_job_handler::<S>),
        )
        .route(
            "/api/jobs/:job_id",
            get(get_job_handler::<S>)
                .put(update_job_handler::<S>)
                .delete(delete_job_handler::<S>),
        )
        .with_state(service)
}

/// Registration and profile endpoints.
pub fn account_router<S>(service: Arc<AccountService<S>>) -> Router
where
    S: UserDirectory + 'static,
{
    Router::new()
        .route("/api/user/register", post(register_handler::<S>))
        .route("/api/user/me", get(me_handler::<S>))
        .route("/api/user/profile/resume", put(resume_handler::<S>))
        .with_state(service)
}

pub(crate) async fn list_jobs_handler<S>(State(service): State<Arc<JobService<S>>>) -> Response
where
    S: JobRepository + UserDirectory + 'static,
{
    match run_blocking(move || service.list()).await {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn get_job_handler<S>(
    State(service): State<Arc<JobService<S>>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: JobRepository + UserDirectory + 'static,
{
    match run_blocking(move || service.get(&JobId(job_id))).await {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn post_job_handler<S>(
    State(service): State<Arc<JobService<S>>>,
    headers: HeaderMap,
    body: Result<Json<JobDraft>, JsonRejection>,
) -> Response
where
    S: JobRepository + UserDirectory + 'static,
{
    let result = match (session_user_id(&headers), body) {
        (Ok(user_id), Ok(Json(draft))) => {
            run_blocking(move || {
                let recruiter = service.actor(&user_id)?.into_recruiter()?;
                service.post(&recruiter, draft)
            })
            .await
        }
        (Err(error), _) => Err(error),
        (_, Err(rejection)) => Err(BoardError::from(rejection)),
    };

    match result {
        Ok(job) => (StatusCode::CREATED, Json(job)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn update_job_handler<S>(
    State(service): State<Arc<JobService<S>>>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
    body: Result<Json<JobDraft>, JsonRejection>,
) -> Response
where
    S: JobRepository + UserDirectory + 'static,
{
    let id = JobId(job_id);
    let result = match (session_user_id(&headers), body) {
        (Ok(user_id), Ok(Json(draft))) => {
            run_blocking(move || {
                let recruiter = service.actor(&user_id)?.into_recruiter()?;
                service.update(&recruiter, &id, draft)
            })
            .await
        }
        (Err(error), _) => Err(error),
        (_, Err(rejection)) => Err(BoardError::from(rejection)),
    };

    match result {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn delete_job_handler<S>(
    State(service): State<Arc<JobService<S>>>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
) -> Response
where
    S: JobRepository + UserDirectory + 'static,
{
    let id = JobId(job_id);
    let result = match session_user_id(&headers) {
        Ok(user_id) => {
            run_blocking(move || {
                let recruiter = service.actor(&user_id)?.into_recruiter()?;
                service.delete(&recruiter, &id)
            })
            .await
        }
        Err(error) => Err(error),
    };

    match result {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeUpdate {
    pub resume: String,
}

pub(crate) async fn register_handler<S>(
    State(service): State<Arc<AccountService<S>>>,
    body: Result<Json<Registration>, JsonRejection>,
) -> Response
where
    S: UserDirectory + 'static,
{
    let result = match body {
        Ok(Json(registration)) => run_blocking(move || service.register(registration)).await,
        Err(rejection) => Err(BoardError::from(rejection)),
    };

    match result {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn me_handler<S>(
    State(service): State<Arc<AccountService<S>>>,
    headers: HeaderMap,
) -> Response
where
    S: UserDirectory + 'static,
{
    let result = match session_user_id(&headers) {
        Ok(user_id) => run_blocking(move || service.get(&user_id)).await,
        Err(error) => Err(error),
    };

    match result {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn resume_handler<S>(
    State(service): State<Arc<AccountService<S>>>,
    headers: HeaderMap,
    body: Result<Json<ResumeUpdate>, JsonRejection>,
) -> Response
where
    S: UserDirectory + 'static,
{
    let result = match (session_user_id(&headers), body) {
        (Ok(user_id), Ok(Json(update))) => {
            run_blocking(move || {
                let applicant = service.actor(&user_id)?.into_applicant()?;
                service.update_resume(&applicant, &update.resume)
            })
            .await
        }
        (Err(error), _) => Err(error),
        (_, Err(rejection)) => Err(BoardError::from(rejection)),
    };

    match result {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(error) => error.into_response(),
    }
}
