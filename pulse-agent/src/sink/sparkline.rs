use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::error::RenderStateError;

/// Rolling history of values, oldest first.
#[derive(Debug)]
pub struct SparklineSink {
    cap: Option<usize>,
    history: Mutex<VecDeque<u64>>,
}

impl SparklineSink {
    /// `cap` bounds the history; the oldest values fall off first.
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            cap,
            history: Mutex::new(VecDeque::new()),
        }
    }

    pub fn update(&self, value: i64) -> Result<(), RenderStateError> {
        let value = u64::try_from(value).map_err(|_| RenderStateError::OutOfRange {
            value,
            min: 0,
            max: i64::MAX,
        })?;
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.push_back(value);
        if let Some(cap) = self.cap {
            while history.len() > cap {
                history.pop_front();
            }
        }
        Ok(())
    }

    pub fn history(&self) -> Vec<u64> {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.iter().copied().collect()
    }

    /// The newest `n` values, for a view that is `n` cells wide.
    pub fn tail(&self, n: usize) -> Vec<u64> {
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        let skip = history.len().saturating_sub(n);
        history.iter().skip(skip).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
