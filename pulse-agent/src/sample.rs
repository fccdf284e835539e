use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cpu,
    Memory,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Memory => "memory",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One reading of one metric. Never mutated after capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    metric: Metric,
    value: u64,
    captured_at: DateTime<Utc>,
}

impl Sample {
    pub fn capture(metric: Metric, value: u64) -> Self {
        Self::at(metric, value, Utc::now())
    }

    pub fn at(metric: Metric, value: u64, captured_at: DateTime<Utc>) -> Self {
        Self {
            metric,
            value,
            captured_at,
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}
