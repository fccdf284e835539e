use axum::{Json, Router, extract::State, routing::get};
use pulse_agent::MetricResponse;
use tokio::task;

use super::AppState;
use crate::error::{ApiError, Result};
use crate::services::snapshot;

pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", get(get_metrics_handler))
}

async fn get_metrics_handler(State(state): State<AppState>) -> Result<Json<Vec<MetricResponse>>> {
    let entries = task::spawn_blocking(move || snapshot(state.sampler.as_ref(), &state.metrics))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(entries))
}
