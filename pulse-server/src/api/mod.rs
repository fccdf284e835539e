pub mod metrics;

use std::sync::Arc;

use axum::Router;
use pulse_agent::{Metric, Sampler};
use tower_http::trace::TraceLayer;

use crate::services::SERVED_METRICS;

#[derive(Clone)]
pub struct AppState {
    pub sampler: Arc<dyn Sampler>,
    pub metrics: Arc<[Metric]>,
}

impl AppState {
    pub fn new(sampler: Arc<dyn Sampler>) -> Self {
        Self::with_metrics(sampler, SERVED_METRICS)
    }

    pub fn with_metrics(sampler: Arc<dyn Sampler>, metrics: &[Metric]) -> Self {
        Self {
            sampler,
            metrics: Arc::from(metrics),
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .merge(metrics::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
