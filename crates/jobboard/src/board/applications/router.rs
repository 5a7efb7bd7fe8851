use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationListing, ApplicationPayload, ApplicationStatus};
use super::query::{ReviewQuery, SortKey, StatusFilter};
use super::service::ApplicationService;
use crate::board::error::BoardError;
use crate::board::identity::session_user_id;
use crate::board::jobs::JobId;
use crate::board::repository::{BoardStore, EventPublisher};
use crate::board::run_blocking;

/// Router builder exposing submission, status transitions and the scoped listings.
pub fn application_router<S, E>(service: Arc<ApplicationService<S, E>>) -> Router
where
    S: BoardStore + 'static,
    E: EventPublisher + 'static,
{
    Router::new()
        .route("/api/applications", post(submit_handler::<S, E>))
        .route(
            "/api/applications/:application_id/status",
            patch(transition_handler::<S, E>),
        )
        .route(
            "/api/applications/recruiter/applications",
            get(recruiter_applications_handler::<S, E>),
        )
        .route(
            "/api/applications/recruiter/applications/:application_id",
            get(recruiter_application_handler::<S, E>),
        )
        .route(
            "/api/applications/applicant/applications",
            get(applicant_applications_handler::<S, E>),
        )
        .with_state(service)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub job_id: JobId,
    #[serde(default)]
    pub payload: ApplicationPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    pub new_status: ApplicationStatus,
}

/// Query string accepted by the recruiter listing; all fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListingParams {
    fn into_query(self) -> Result<ReviewQuery, BoardError> {
        let status_filter = match self.status {
            Some(raw) => raw
                .parse::<StatusFilter>()
                .map_err(|error| BoardError::Validation(error.to_string()))?,
            None => StatusFilter::All,
        };
        let sort_by = match self.sort {
            Some(raw) => raw
                .parse::<SortKey>()
                .map_err(|error| BoardError::Validation(error.to_string()))?,
            None => SortKey::Newest,
        };
        Ok(ReviewQuery {
            status_filter,
            search_text: self.search.unwrap_or_default(),
            sort_by,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<ApplicationListing>,
}

pub(crate) async fn submit_handler<S, E>(
    State(service): State<Arc<ApplicationService<S, E>>>,
    headers: HeaderMap,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
    E: EventPublisher + 'static,
{
    let result = match (session_user_id(&headers), body) {
        (Ok(user_id), Ok(Json(request))) => {
            run_blocking(move || {
                let applicant = service.actor(&user_id)?.into_applicant()?;
                service.submit(&applicant, &request.job_id, request.payload)
            })
            .await
        }
        (Err(error), _) => Err(error),
        (_, Err(rejection)) => Err(BoardError::from(rejection)),
    };

    match result {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn transition_handler<S, E>(
    State(service): State<Arc<ApplicationService<S, E>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    body: Result<Json<TransitionRequest>, JsonRejection>,
) -> Response
where
    S: BoardStore + 'static,
    E: EventPublisher + 'static,
{
    let id = ApplicationId(application_id);
    let result = match (session_user_id(&headers), body) {
        (Ok(user_id), Ok(Json(request))) => {
            run_blocking(move || {
                let recruiter = service.actor(&user_id)?.into_recruiter()?;
                service.transition(&recruiter, &id, request.new_status)
            })
            .await
        }
        (Err(error), _) => Err(error),
        (_, Err(rejection)) => Err(BoardError::from(rejection)),
    };

    match result {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn recruiter_applications_handler<S, E>(
    State(service): State<Arc<ApplicationService<S, E>>>,
    headers: HeaderMap,
    params: Result<Query<ListingParams>, QueryRejection>,
) -> Response
where
    S: BoardStore + 'static,
    E: EventPublisher + 'static,
{
    let prepared = params
        .map_err(BoardError::from)
        .and_then(|Query(params)| params.into_query())
        .and_then(|query| Ok((session_user_id(&headers)?, query)));
    let result = match prepared {
        Ok((user_id, query)) => {
            run_blocking(move || {
                let recruiter = service.actor(&user_id)?.into_recruiter()?;
                service.list_for_recruiter(&recruiter, &query)
            })
            .await
        }
        Err(error) => Err(error),
    };

    match result {
        Ok(applications) => {
            (StatusCode::OK, Json(ApplicationsResponse { applications })).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn recruiter_application_handler<S, E>(
    State(service): State<Arc<ApplicationService<S, E>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
) -> Response
where
    S: BoardStore + 'static,
    E: EventPublisher + 'static,
{
    let id = ApplicationId(application_id);
    let result = match session_user_id(&headers) {
        Ok(user_id) => {
            run_blocking(move || {
                let recruiter = service.actor(&user_id)?.into_recruiter()?;
                service.get_for_recruiter(&recruiter, &id)
            })
            .await
        }
        Err(error) => Err(error),
    };

    match result {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn applicant_applications_handler<S, E>(
    State(service): State<Arc<ApplicationService<S, E>>>,
    headers: HeaderMap,
) -> Response
where
    S: BoardStore + 'static,
    E: EventPublisher + 'static,
{
    let result = match session_user_id(&headers) {
        Ok(user_id) => {
            run_blocking(move || {
                let applicant = service.actor(&user_id)?.into_applicant()?;
                service.list_for_applicant(&applicant)
            })
            .await
        }
        Err(error) => Err(error),
    };

    match result {
        Ok(applications) => {
            (StatusCode::OK, Json(ApplicationsResponse { applications })).into_response()
        }
        Err(error) => error.into_response(),
    }
}
