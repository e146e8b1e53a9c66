use crate::infra::{AppState, Marketplace};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use parttime::workflows::applications::application_router;
use parttime::workflows::notifications::notification_router;
use serde_json::json;

pub(crate) fn with_marketplace_routes(marketplace: &Marketplace) -> axum::Router {
    application_router(marketplace.applications.clone())
        .merge(notification_router(marketplace.notifications.clone()))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::load_catalog;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use parttime::identity::{ROLE_HEADER, USER_ID_HEADER};
    use parttime::workflows::applications::MatchConfig;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let marketplace = Marketplace::new(
            load_catalog(None).expect("bundled catalog"),
            MatchConfig::default(),
        );
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_marketplace_routes(&marketplace).layer(Extension(state))
    }

    fn as_user(method: &str, uri: &str, user: &str, role: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, user)
            .header(ROLE_HEADER, role);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn health_and_readiness_report_state() {
        let health = app(false)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(health.status(), StatusCode::OK);

        let initializing = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(initializing.status(), StatusCode::SERVICE_UNAVAILABLE);

        let ready = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(ready.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_text() {
        let response = app(true)
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn apply_then_accept_lands_in_seeker_inbox() {
        let router = app(true);

        let applied = router
            .clone()
            .oneshot(as_user(
                "POST",
                "/api/applications",
                "user-sam",
                "job_seeker",
                Some(json!({ "jobId": "job-barista" })),
            ))
            .await
            .expect("route executes");
        assert_eq!(applied.status(), StatusCode::CREATED);
        let applied = json_body(applied).await;
        let application_id = applied["application"]["id"]
            .as_str()
            .expect("application id")
            .to_string();
        assert_eq!(applied["application"]["match_score"], 70);

        let accepted = router
            .clone()
            .oneshot(as_user(
                "PATCH",
                &format!("/api/applications/{application_id}/status"),
                "user-bean-there",
                "employer",
                Some(json!({ "status": "Accepted" })),
            ))
            .await
            .expect("route executes");
        assert_eq!(accepted.status(), StatusCode::OK);

        let inbox = router
            .oneshot(as_user(
                "GET",
                "/api/notifications",
                "user-sam",
                "job_seeker",
                None,
            ))
            .await
            .expect("route executes");
        let inbox = json_body(inbox).await;
        let message = inbox["notifications"][0]["message"]
            .as_str()
            .expect("message");
        assert!(message.contains("Barista"));
        assert!(message.contains("Accepted"));
    }
}
