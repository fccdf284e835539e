//! Timer-driven loop connecting one metric source to one sink.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::cancel::CancellationToken;
use crate::error::SamplingError;
use crate::sample::Sample;
use crate::sink::Sink;

/// What a pump did before it was cancelled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpReport {
    pub delivered: u64,
    pub skipped: u64,
    pub rejected: u64,
}

/// Samples `source` on a fixed-rate schedule and feeds `sink` until `cancel` is set.
///
/// The first tick fires one `interval` after start. Late ticks are dropped
/// rather than bunched up. A failed sample skips its tick and a rejected
/// value is dropped; neither stops the pump. Cancellation is the only exit.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub async fn run<F>(
    interval: Duration,
    mut source: F,
    sink: Sink,
    cancel: CancellationToken,
) -> PumpReport
where
    F: FnMut() -> Result<Sample, SamplingError>,
{
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut report = PumpReport::default();

    debug!(sink = sink.kind(), ?interval, "pump started");
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if cancel.is_cancelled() {
                    break;
                }
                let sample = match source() {
                    Ok(sample) => sample,
                    Err(e) => {
                        warn!(sink = sink.kind(), error = %e, "sampling failed, skipping tick");
                        report.skipped += 1;
                        continue;
                    }
                };
                match sink.update(&sample) {
                    Ok(()) => report.delivered += 1,
                    Err(e) => {
                        debug!(sink = sink.kind(), error = %e, "sink rejected update");
                        report.rejected += 1;
                    }
                }
            }
        }
    }
    debug!(sink = sink.kind(), ?report, "pump stopped");
    report
}

/// Runs [`run`] as its own task.
pub fn spawn<F>(
    interval: Duration,
    source: F,
    sink: Sink,
    cancel: CancellationToken,
) -> JoinHandle<PumpReport>
where
    F: FnMut() -> Result<Sample, SamplingError> + Send + 'static,
{
    tokio::spawn(run(interval, source, sink, cancel))
}
