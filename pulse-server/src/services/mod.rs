use std::sync::Arc;

use pulse_agent::{Metric, MetricResponse, ResponseSink, Sampler, SamplingError, Sink};

use crate::error::Result;

/// Metrics answered by `GET /metrics`, one entry each, in this order.
pub const SERVED_METRICS: &[Metric] = &[Metric::Memory];

/// Samples every metric afresh and collects one response entry per sample.
pub fn snapshot(sampler: &dyn Sampler, metrics: &[Metric]) -> Result<Vec<MetricResponse>> {
    let entries = Arc::new(ResponseSink::new());
    let sink = Sink::from(entries.clone());
    for &metric in metrics {
        let sample = sampler.sample(metric)?;
        if metric == Metric::Memory && sample.value() == 0 {
            return Err(SamplingError::MemoryUnavailable.into());
        }
        sink.update(&sample)?;
    }
    Ok(entries.entries())
}
