use std::sync::{Mutex, PoisonError};

use crate::error::RenderStateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonutMode {
    /// Values are whole percentages.
    Percent,
    /// Values are a numerator over a fixed denominator.
    Absolute { total: i64 },
}

/// A gauge holding the latest accepted value.
#[derive(Debug)]
pub struct DonutSink {
    mode: DonutMode,
    current: Mutex<Option<i64>>,
}

impl DonutSink {
    pub fn percent() -> Self {
        Self {
            mode: DonutMode::Percent,
            current: Mutex::new(None),
        }
    }

    pub fn absolute(total: i64) -> Result<Self, RenderStateError> {
        if total <= 0 {
            return Err(RenderStateError::InvalidDenominator(total));
        }
        Ok(Self {
            mode: DonutMode::Absolute { total },
            current: Mutex::new(None),
        })
    }

    pub fn mode(&self) -> DonutMode {
        self.mode
    }

    pub fn update(&self, value: i64) -> Result<(), RenderStateError> {
        let max = match self.mode {
            DonutMode::Percent => 100,
            DonutMode::Absolute { total } => total,
        };
        if !(0..=max).contains(&value) {
            return Err(RenderStateError::OutOfRange { value, min: 0, max });
        }
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
        Ok(())
    }

    /// The last accepted value, `None` until the first update lands.
    pub fn value(&self) -> Option<i64> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Filled fraction in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        let value = self.value().unwrap_or(0) as f64;
        match self.mode {
            DonutMode::Percent => value / 100.0,
            DonutMode::Absolute { total } => value / total as f64,
        }
    }

    pub fn label(&self) -> String {
        match (self.mode, self.value()) {
            (_, None) => "--".to_string(),
            (DonutMode::Percent, Some(v)) => format!("{}%", v),
            (DonutMode::Absolute { total }, Some(v)) => format!("{}/{}", v, total),
        }
    }
}
