use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inference::InferenceError;
use thiserror::Error;

use crate::state::ApiResponse;

/// Per-request failures, converted to the uniform JSON envelope at the
/// handler boundary. Nothing here propagates far enough to crash the
/// process.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing image query parameter (?image=ImageURL)")]
    MissingImageParam,

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingImageParam => StatusCode::BAD_REQUEST,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ApiResponse::failure(self.to_string())),
        )
            .into_response()
    }
}
