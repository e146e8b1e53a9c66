use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ApplicationId;
use super::repository::ApplicationRepository;
use super::service::{ApplicationService, ApplicationServiceError};
use crate::identity::{Identity, Role};
use crate::workflows::catalog::{Directory, JobId};
use crate::workflows::notifications::Notifier;

/// Router builder exposing the application lifecycle over HTTP.
pub fn application_router<R, D, N>(service: Arc<ApplicationService<R, D, N>>) -> Router
where
    R: ApplicationRepository + 'static,
    D: Directory + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/applications", post(apply_handler::<R, D, N>))
        .route("/api/applications/my", get(my_applications_handler::<R, D, N>))
        .route(
            "/api/applications/:application_id",
            delete(withdraw_handler::<R, D, N>),
        )
        .route(
            "/api/applications/:application_id/status",
            patch(status_handler::<R, D, N>),
        )
        .route(
            "/api/employer/applications",
            get(employer_applications_handler::<R, D, N>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplyRequest {
    #[serde(default, alias = "jobId")]
    pub(crate) job_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusRequest {
    #[serde(default)]
    pub(crate) status: Option<String>,
}

pub(crate) async fn apply_handler<R, D, N>(
    State(service): State<Arc<ApplicationService<R, D, N>>>,
    identity: Identity,
    Json(body): Json<ApplyRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    D: Directory + 'static,
    N: Notifier + 'static,
{
    let job_id = JobId(body.job_id.unwrap_or_default());
    match service.apply(&identity.user_id, &job_id) {
        Ok(record) => {
            let payload = json!({
                "message": "Application submitted successfully!",
                "application": record,
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn my_applications_handler<R, D, N>(
    State(service): State<Arc<ApplicationService<R, D, N>>>,
    identity: Identity,
) -> Response
where
    R: ApplicationRepository + 'static,
    D: Directory + 'static,
    N: Notifier + 'static,
{
    match service.applications_for_seeker(&identity.user_id) {
        Ok(views) => {
            (StatusCode::OK, Json(json!({ "applications": views }))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn withdraw_handler<R, D, N>(
    State(service): State<Arc<ApplicationService<R, D, N>>>,
    identity: Identity,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    D: Directory + 'static,
    N: Notifier + 'static,
{
    match service.withdraw(&identity.user_id, &ApplicationId(application_id)) {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Application withdrawn successfully." })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn status_handler<R, D, N>(
    State(service): State<Arc<ApplicationService<R, D, N>>>,
    identity: Identity,
    Path(application_id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    D: Directory + 'static,
    N: Notifier + 'static,
{
    let status = body.status.unwrap_or_default();
    match service.update_status(&identity.user_id, &ApplicationId(application_id), &status) {
        Ok(record) => {
            let payload = json!({
                "message": "Application status updated.",
                "application": record,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn employer_applications_handler<R, D, N>(
    State(service): State<Arc<ApplicationService<R, D, N>>>,
    identity: Identity,
) -> Response
where
    R: ApplicationRepository + 'static,
    D: Directory + 'static,
    N: Notifier + 'static,
{
    if identity.role != Role::Employer {
        let payload = json!({ "error": "Only employers can access this." });
        return (StatusCode::FORBIDDEN, Json(payload)).into_response();
    }

    match service.applications_for_employer(&identity.user_id) {
        Ok(views) => {
            (StatusCode::OK, Json(json!({ "applications": views }))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

impl IntoResponse for ApplicationServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApplicationServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationServiceError::Conflict => StatusCode::CONFLICT,
            ApplicationServiceError::InvalidState { .. }
            | ApplicationServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApplicationServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
