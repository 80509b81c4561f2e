use inference::DetectionProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Uniform envelope for every JSON response the API produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(labels: Vec<String>) -> Self {
        Self {
            status: true,
            labels: Some(labels),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: false,
            labels: None,
            error: Some(error.into()),
        }
    }
}

/// Shared read-only request-handling state.
///
/// The provider handle is constructed once at startup; requests never
/// reconfigure it.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DetectionProvider>,
}
