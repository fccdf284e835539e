use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::error::RenderStateError;
use crate::sample::Sample;

/// One entry of the `/metrics` JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricResponse {
    pub timestamp: String,
    pub metric: String,
    pub value: u64,
}

impl From<&Sample> for MetricResponse {
    fn from(sample: &Sample) -> Self {
        Self {
            timestamp: sample.captured_at().to_rfc3339(),
            metric: sample.metric().to_string(),
            value: sample.value(),
        }
    }
}

/// Collects the entries of a single HTTP response, one per sample.
#[derive(Debug, Default)]
pub struct ResponseSink {
    entries: Mutex<Vec<MetricResponse>>,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sample: &Sample) -> Result<(), RenderStateError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MetricResponse::from(sample));
        Ok(())
    }

    pub fn entries(&self) -> Vec<MetricResponse> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_entries(self) -> Vec<MetricResponse> {
        self.entries
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
