use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use gateway::routes::build_router;
use gateway::state::{ApiResponse, AppState};
use inference::{Detection, DetectionProvider, InferenceError};
use tempfile::tempdir;
use tower::ServiceExt;

/// Provider returning a fixed detection list, in order.
struct StaticProvider {
    detections: Vec<Detection>,
}

#[async_trait]
impl DetectionProvider for StaticProvider {
    async fn detect(&self, _image_url: &str) -> Result<Vec<Detection>, InferenceError> {
        Ok(self.detections.clone())
    }

    fn model_id(&self) -> &str {
        "test/detr"
    }
}

/// Provider failing the way the hosted API reports structured errors.
struct FailingProvider {
    error: fn() -> InferenceError,
}

#[async_trait]
impl DetectionProvider for FailingProvider {
    async fn detect(&self, _image_url: &str) -> Result<Vec<Detection>, InferenceError> {
        Err((self.error)())
    }

    fn model_id(&self) -> &str {
        "test/detr"
    }
}

/// Provider that must never be reached; proves validation short-circuits.
struct UnreachableProvider;

#[async_trait]
impl DetectionProvider for UnreachableProvider {
    async fn detect(&self, _image_url: &str) -> Result<Vec<Detection>, InferenceError> {
        panic!("provider must not be called for invalid requests");
    }

    fn model_id(&self) -> &str {
        "test/detr"
    }
}

fn labeled(label: &str, score: f64) -> Detection {
    Detection {
        label: label.to_string(),
        score: Some(score),
        bounding_box: None,
    }
}

fn router_with(provider: Arc<dyn DetectionProvider>, static_dir: &Path) -> Router {
    let state = AppState { provider };
    build_router(state, static_dir.to_str().unwrap())
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_envelope(response: axum::response::Response) -> ApiResponse {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn detect_projects_labels_in_provider_order() {
    let dir = tempdir().unwrap();
    let provider = StaticProvider {
        detections: vec![labeled("cat", 0.98), labeled("chair", 0.4)],
    };
    let app = router_with(Arc::new(provider), dir.path());

    let response = get(app, "/api/detect?image=https://example.com/cat.jpg").await;

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = body_envelope(response).await;
    assert!(envelope.status);
    assert_eq!(
        envelope.labels,
        Some(vec!["cat".to_string(), "chair".to_string()]),
        "labels must be the ordered projection of provider output"
    );
    assert!(envelope.error.is_none());
}

#[tokio::test]
async fn missing_image_param_returns_400() {
    let dir = tempdir().unwrap();
    let app = router_with(Arc::new(UnreachableProvider), dir.path());

    let response = get(app, "/api/detect").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = body_envelope(response).await;
    assert!(!envelope.status);
    assert_eq!(
        envelope.error.as_deref(),
        Some("Missing image query parameter (?image=ImageURL)")
    );
    assert!(envelope.labels.is_none());
}

#[tokio::test]
async fn empty_image_param_returns_400() {
    let dir = tempdir().unwrap();
    let app = router_with(Arc::new(UnreachableProvider), dir.path());

    let response = get(app, "/api/detect?image=").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = body_envelope(response).await;
    assert_eq!(
        envelope.error.as_deref(),
        Some("Missing image query parameter (?image=ImageURL)")
    );
}

#[tokio::test]
async fn provider_error_is_surfaced_verbatim() {
    let dir = tempdir().unwrap();
    let provider = FailingProvider {
        error: || InferenceError::Provider {
            message: "model is cold-starting".to_string(),
        },
    };
    let app = router_with(Arc::new(provider), dir.path());

    let response = get(app, "/api/detect?image=https://example.com/cat.jpg").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = body_envelope(response).await;
    assert!(!envelope.status);
    assert_eq!(envelope.error.as_deref(), Some("model is cold-starting"));
}

#[tokio::test]
async fn missing_provider_output_maps_to_500() {
    let dir = tempdir().unwrap();
    let provider = FailingProvider {
        error: || InferenceError::MissingOutput,
    };
    let app = router_with(Arc::new(provider), dir.path());

    let response = get(app, "/api/detect?image=https://example.com/cat.jpg").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = body_envelope(response).await;
    assert_eq!(
        envelope.error.as_deref(),
        Some("provider returned no detection output")
    );
}

#[tokio::test]
async fn unknown_api_path_returns_404_envelope() {
    let dir = tempdir().unwrap();
    let app = router_with(Arc::new(UnreachableProvider), dir.path());

    let response = get(app, "/api/segment").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let envelope = body_envelope(response).await;
    assert!(!envelope.status);
    assert_eq!(envelope.error.as_deref(), Some("Not Found"));
}

#[tokio::test]
async fn unmatched_path_redirects_to_homepage() {
    let dir = tempdir().unwrap();
    let app = router_with(Arc::new(UnreachableProvider), dir.path());

    let response = get(app, "/some/page").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
}

#[tokio::test]
async fn static_assets_are_served_from_static_dir() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>demo</html>").unwrap();
    let app = router_with(Arc::new(UnreachableProvider), dir.path());

    let response = get(app, "/index.html").await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<html>demo</html>");
}
