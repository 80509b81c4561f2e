use axum::{
    Json, Router,
    extract::{Query, State},
    handler::HandlerWithoutStateExt,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::errors::ApiError;
use crate::state::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct DetectParams {
    image: Option<String>,
}

/// GET /api/detect?image=ImageURL
///
/// Validates the query parameter, awaits one provider call and projects
/// the detection labels in provider order. All failures come back through
/// [`ApiError`] as the uniform JSON envelope.
pub async fn detect(
    State(state): State<AppState>,
    Query(params): Query<DetectParams>,
) -> Result<Json<ApiResponse>, ApiError> {
    let image = match params.image.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => return Err(ApiError::MissingImageParam),
    };

    tracing::debug!(
        model = state.provider.model_id(),
        image,
        "forwarding detection request"
    );

    let detections = match state.provider.detect(image).await {
        Ok(detections) => detections,
        Err(e) => {
            tracing::error!(error = %e, "provider call failed");
            return Err(e.into());
        }
    };

    let labels: Vec<String> = detections.into_iter().map(|d| d.label).collect();

    tracing::debug!(labels = labels.len(), "detection completed");

    Ok(Json(ApiResponse::success(labels)))
}

/// Terminal handler for anything neither the API routes nor the static
/// file service matched: unknown API paths get a JSON 404, everything
/// else is sent back to the homepage.
async fn catchall(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failure("Not Found")),
        )
            .into_response()
    } else {
        (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
    }
}

/// Assemble the application router: the detection endpoint, static assets
/// out of `static_dir`, and the catch-all behind the file service.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    let static_files = ServeDir::new(static_dir).fallback(catchall.into_service());

    Router::new()
        .route("/api/detect", get(detect))
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
