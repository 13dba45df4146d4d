//! API route definitions.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::state::AppState;
use crate::analysis::Stats;
use crate::dashboard::{DashboardInput, RenderDescriptor};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/render", post(render))
        .route("/stats", post(stats))
}

async fn health() -> Json<Value> {
    Json(json!({
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        },
        "meta": {
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

async fn render(
    State(state): State<AppState>,
    Json(input): Json<DashboardInput>,
) -> Json<RenderDescriptor> {
    let descriptor = state.composer.compose(&input);
    info!(
        markers = descriptor.markers.len(),
        points = descriptor.series.len(),
        "rendered dashboard"
    );
    Json(descriptor)
}

async fn stats(State(state): State<AppState>, Json(input): Json<DashboardInput>) -> Json<Stats> {
    Json(state.composer.stats(&input))
}

#[cfg(test)]
mod tests {
    use super::super::router;
    use super::*;
    use crate::dashboard::Composer;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        router(AppState::new(Composer::default()))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1_000_000)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let request = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert!(json["meta"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_render_endpoint() {
        let body = r#"{
            "chartData": [{"hour": "2024-01-01T05:00", "clicks": 120, "baseline": 100}],
            "anomalies": [{"name": "a1", "anomaly_type": "click_spike", "event_hour": "2024-01-01T05:00", "clicks": 120}]
        }"#;
        let response = app().oneshot(post_json("/api/v1/render", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["title"], "Anomaly Visualization");
        assert_eq!(json["chart"]["height"], 400);
        assert_eq!(json["stats"]["total"], 1);
        assert_eq!(json["markers"][0]["x"], "2024-01-01T05:00");
        assert_eq!(json["markers"][0]["variant"], "spike");
        assert_eq!(json["cards"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_stats_endpoint_empty_body_object() {
        let response = app().oneshot(post_json("/api/v1/stats", "{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total"], 0);
        assert_eq!(json["spike_count"], 0);
        assert_eq!(json["drop_count"], 0);
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let response = app()
            .oneshot(post_json("/api/v1/render", "{oops"))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let request = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
