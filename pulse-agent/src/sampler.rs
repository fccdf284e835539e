use std::sync::{Mutex, PoisonError};

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use crate::error::SamplingError;
use crate::sample::{Metric, Sample};

/// Only the first logical core is reported, even though every core is refreshed.
pub const PRIMARY_CORE: usize = 0;

pub trait Sampler: Send + Sync {
    /// Utilization of [`PRIMARY_CORE`] as a whole percentage, 0 to 100.
    fn sample_cpu(&self) -> Result<u8, SamplingError>;

    /// Installed memory in bytes. Zero when the host would not say.
    fn sample_memory(&self) -> u64;

    fn sample(&self, metric: Metric) -> Result<Sample, SamplingError> {
        let value = match metric {
            Metric::Cpu => u64::from(self.sample_cpu()?),
            Metric::Memory => self.sample_memory(),
        };
        Ok(Sample::capture(metric, value))
    }
}

/// Reads the local host.
///
/// CPU usage is a delta between refreshes, so the CPU view is kept behind a
/// lock. Memory is read from a fresh view each call and never waits on it.
pub struct HostSampler {
    sys: Mutex<System>,
}

impl HostSampler {
    pub fn new() -> Self {
        let sys = System::new_with_specifics(RefreshKind::new().with_cpu(CpuRefreshKind::everything()));
        Self {
            sys: Mutex::new(sys),
        }
    }
}

impl Default for HostSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for HostSampler {
    fn sample_cpu(&self) -> Result<u8, SamplingError> {
        let mut sys = self.sys.lock().unwrap_or_else(PoisonError::into_inner);
        sys.refresh_cpu();
        let usages: Vec<f32> = sys.cpus().iter().map(|c| c.cpu_usage()).collect();
        core_percent(&usages, PRIMARY_CORE)
    }

    fn sample_memory(&self) -> u64 {
        System::new_with_specifics(RefreshKind::new().with_memory(MemoryRefreshKind::everything()))
            .total_memory()
    }
}

/// Picks one core out of a per-core usage list, truncating toward zero.
pub fn core_percent(usages: &[f32], index: usize) -> Result<u8, SamplingError> {
    let usage = usages
        .get(index)
        .copied()
        .ok_or(SamplingError::NoCpu { index })?;
    if usage.is_nan() {
        return Ok(0);
    }
    Ok(usage.clamp(0.0, 100.0) as u8)
}
