use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::api::routes::{healthz, schedule_apply, schedule_preview};

pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/schedule-preview", post(schedule_preview))
        .route("/schedule-apply", post(schedule_apply))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(addr: SocketAddr) -> anyhow::Result<()> {
    init_tracing();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "phrasely api listening");
    axum::serve(listener, router().into_make_service()).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn request_body() -> Value {
        json!({
            "card": {
                "id": "phrase-1",
                "scheduler": { "state": "new", "due_at": "2025-01-01T00:00:00Z" },
                "reviews": 0,
                "lapses": 0
            },
            "now": "2025-01-01T00:00:00Z",
            "config": {
                "request_retention": 0.9,
                "learning_steps": ["1m", "10m"],
                "relearning_steps": ["10m"],
                "enable_fuzz": false,
                "enable_short_term": true
            }
        })
    }

    async fn post(path: &str, body: Value, with_auth: bool) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if with_auth {
            builder = builder.header(header::AUTHORIZATION, "Bearer test-token");
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn healthz_responds() {
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn preview_requires_authorization_header() {
        let (status, body) = post("/schedule-preview", request_body(), false).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn preview_rejects_missing_card() {
        let mut body = request_body();
        body.as_object_mut().unwrap().remove("card");
        let (status, body) = post("/schedule-preview", body, true).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("missing required field: card"));
    }

    #[tokio::test]
    async fn preview_returns_all_four_intervals() {
        let (status, body) = post("/schedule-preview", request_body(), true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));

        let intervals = body["intervals"].as_object().unwrap();
        for rating in ["again", "hard", "good", "easy"] {
            assert!(intervals.contains_key(rating), "{rating}");
        }
        assert_eq!(intervals["again"]["interval_ms"], json!(60_000));
        assert_eq!(intervals["again"]["label"], json!("1m"));
        assert_eq!(
            intervals["again"]["due_at"],
            json!("2025-01-01T00:01:00Z")
        );
    }

    #[tokio::test]
    async fn preview_reports_bad_duration_token() {
        let mut body = request_body();
        body["config"]["learning_steps"] = json!(["1x"]);
        let (status, body) = post("/schedule-preview", body, true).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("invalid duration token: \"1x\""));
    }

    #[tokio::test]
    async fn apply_rejects_unknown_rating() {
        let mut body = request_body();
        body["rating"] = json!("excellent");
        let (status, body) = post("/schedule-apply", body, true).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn apply_advances_the_card() {
        let mut body = request_body();
        body["rating"] = json!("again");
        let (status, body) = post("/schedule-apply", body, true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["card"]["scheduler"]["state"], json!("learning"));
        assert_eq!(body["card"]["reviews"], json!(1));
        assert_eq!(body["applied"]["interval_ms"], json!(60_000));
    }
}
