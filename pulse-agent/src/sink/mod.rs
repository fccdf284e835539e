//! Stateful consumers of samples.
//!
//! Each sink is written by exactly one pump and read by the render loop (or by
//! the HTTP handler that owns it), so every sink guards its own state and no
//! sink shares state with another.

mod donut;
mod response;
mod sparkline;

use std::sync::Arc;

pub use donut::{DonutMode, DonutSink};
pub use response::{MetricResponse, ResponseSink};
pub use sparkline::SparklineSink;

use crate::error::RenderStateError;
use crate::sample::Sample;

#[derive(Clone)]
pub enum Sink {
    Donut(Arc<DonutSink>),
    Sparkline(Arc<SparklineSink>),
    Response(Arc<ResponseSink>),
}

impl Sink {
    /// Feeds one sample in. A rejected value leaves the sink untouched.
    pub fn update(&self, sample: &Sample) -> Result<(), RenderStateError> {
        match self {
            Sink::Donut(d) => d.update(signed(sample.value())?),
            Sink::Sparkline(s) => s.update(signed(sample.value())?),
            Sink::Response(r) => r.record(sample),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Sink::Donut(_) => "donut",
            Sink::Sparkline(_) => "sparkline",
            Sink::Response(_) => "response",
        }
    }
}

impl From<Arc<DonutSink>> for Sink {
    fn from(d: Arc<DonutSink>) -> Self {
        Sink::Donut(d)
    }
}

impl From<Arc<SparklineSink>> for Sink {
    fn from(s: Arc<SparklineSink>) -> Self {
        Sink::Sparkline(s)
    }
}

impl From<Arc<ResponseSink>> for Sink {
    fn from(r: Arc<ResponseSink>) -> Self {
        Sink::Response(r)
    }
}

fn signed(value: u64) -> Result<i64, RenderStateError> {
    i64::try_from(value).map_err(|_| RenderStateError::Overflow(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Metric;

    #[test]
    fn dispatch_reaches_the_wrapped_sink() {
        let donut = Arc::new(DonutSink::percent());
        let spark = Arc::new(SparklineSink::new(None));
        let resp = Arc::new(ResponseSink::new());

        let sample = Sample::capture(Metric::Cpu, 42);
        for sink in [
            Sink::from(donut.clone()),
            Sink::from(spark.clone()),
            Sink::from(resp.clone()),
        ] {
            sink.update(&sample).unwrap();
        }

        assert_eq!(donut.value(), Some(42));
        assert_eq!(spark.history(), vec![42]);
        assert_eq!(resp.entries()[0].value, 42);
    }

    #[test]
    fn values_past_i64_are_rejected_by_gauges() {
        let donut = Arc::new(DonutSink::percent());
        let err = Sink::from(donut.clone())
            .update(&Sample::capture(Metric::Memory, u64::MAX))
            .unwrap_err();
        assert_eq!(err, RenderStateError::Overflow(u64::MAX));
        assert_eq!(donut.value(), None);
    }
}
