pub mod cancel;
pub mod error;
pub mod pump;
pub mod sample;
pub mod sampler;
pub mod sink;

pub use cancel::CancellationToken;
pub use error::{RenderStateError, SamplingError};
pub use sample::{Metric, Sample};
pub use sampler::{HostSampler, Sampler};
pub use sink::{DonutMode, DonutSink, MetricResponse, ResponseSink, Sink, SparklineSink};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
