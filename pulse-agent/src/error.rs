use thiserror::Error;

/// The OS metric query behind a single sample failed.
///
/// Scoped to that one sample: the pump skips the tick, the HTTP path answers 500.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SamplingError {
    #[error("cpu core {index} is not reported by the host")]
    NoCpu { index: usize },

    #[error("total memory could not be read from the host")]
    MemoryUnavailable,
}

/// A sink refused a value outside the domain it can display.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderStateError {
    #[error("value {value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("value {0} does not fit a signed gauge value")]
    Overflow(u64),

    #[error("absolute gauge needs a positive denominator, got {0}")]
    InvalidDenominator(i64),
}
