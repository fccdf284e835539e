use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pulse_agent::{RenderStateError, SamplingError};
use serde_json::json;
use tracing::error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("sampling failed: {0}")]
    Sampling(#[from] SamplingError),

    #[error("could not build response: {0}")]
    Render(#[from] RenderStateError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Sampling(_) | Self::Render(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
