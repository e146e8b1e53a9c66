use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Notice, NotificationCategory, NotificationId};
use super::repository::NotificationRepository;
use super::service::{NotificationCenter, NotificationError};
use crate::identity::Identity;

/// Router exposing the caller's notification inbox.
pub fn notification_router<R>(center: Arc<NotificationCenter<R>>) -> Router
where
    R: NotificationRepository + 'static,
{
    Router::new()
        .route(
            "/api/notifications",
            get(inbox_handler::<R>).post(create_handler::<R>),
        )
        .route("/api/notifications/read-all", patch(read_all_handler::<R>))
        .route(
            "/api/notifications/unread-count",
            get(unread_count_handler::<R>),
        )
        .route(
            "/api/notifications/:notification_id/read",
            patch(mark_read_handler::<R>),
        )
        .route(
            "/api/notifications/:notification_id",
            delete(dismiss_handler::<R>),
        )
        .with_state(center)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateNotification {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<NotificationCategory>,
}

pub(crate) async fn inbox_handler<R>(
    State(center): State<Arc<NotificationCenter<R>>>,
    identity: Identity,
) -> Response
where
    R: NotificationRepository + 'static,
{
    match center.inbox(&identity.user_id) {
        Ok(entries) => {
            (StatusCode::OK, Json(json!({ "notifications": entries }))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn create_handler<R>(
    State(center): State<Arc<NotificationCenter<R>>>,
    identity: Identity,
    Json(body): Json<CreateNotification>,
) -> Response
where
    R: NotificationRepository + 'static,
{
    let notice = Notice::new(
        identity.user_id,
        body.title.unwrap_or_default(),
        body.message.unwrap_or_default(),
        body.category.unwrap_or_default(),
    );
    match center.publish(notice) {
        Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn read_all_handler<R>(
    State(center): State<Arc<NotificationCenter<R>>>,
    identity: Identity,
) -> Response
where
    R: NotificationRepository + 'static,
{
    match center.mark_all_read(&identity.user_id) {
        Ok(updated) => (
            StatusCode::OK,
            Json(json!({ "message": "All notifications marked as read.", "updated": updated })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn mark_read_handler<R>(
    State(center): State<Arc<NotificationCenter<R>>>,
    identity: Identity,
    Path(notification_id): Path<String>,
) -> Response
where
    R: NotificationRepository + 'static,
{
    match center.mark_read(&identity.user_id, &NotificationId(notification_id)) {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn dismiss_handler<R>(
    State(center): State<Arc<NotificationCenter<R>>>,
    identity: Identity,
    Path(notification_id): Path<String>,
) -> Response
where
    R: NotificationRepository + 'static,
{
    match center.dismiss(&identity.user_id, &NotificationId(notification_id)) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Notification deleted." })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn unread_count_handler<R>(
    State(center): State<Arc<NotificationCenter<R>>>,
    identity: Identity,
) -> Response
where
    R: NotificationRepository + 'static,
{
    match center.unread_count(&identity.user_id) {
        Ok(count) => (StatusCode::OK, Json(json!({ "count": count }))).into_response(),
        Err(err) => err.into_response(),
    }
}

impl IntoResponse for NotificationError {
    fn into_response(self) -> Response {
        let status = match &self {
            NotificationError::NotFound => StatusCode::NOT_FOUND,
            NotificationError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            NotificationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
