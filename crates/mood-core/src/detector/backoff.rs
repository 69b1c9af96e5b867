//! Retry schedule for failing detectors

use crate::config::DetectionConfig;
use std::time::Duration;

/// What the loop should do after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    /// Try again after `delay`
    Retry { attempt: u32, delay: Duration },
    /// Retries used up; poll at the degraded interval until a success
    Exhausted { consecutive_failures: u32 },
}

/// Linear backoff: attempt `n` waits `base × n`, up to `max_retries` attempts
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max_retries: u32,
    failures: u32,
}

impl Backoff {
    pub fn new(base: Duration, max_retries: u32) -> Self {
        Self {
            base,
            max_retries,
            failures: 0,
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.retry_delay(), config.max_retries)
    }

    /// Register a failure and get the next step
    pub fn on_failure(&mut self) -> RetryStep {
        self.failures = self.failures.saturating_add(1);
        if self.failures <= self.max_retries {
            RetryStep::Retry {
                attempt: self.failures,
                delay: self.base * self.failures,
            }
        } else {
            RetryStep::Exhausted {
                consecutive_failures: self.failures,
            }
        }
    }

    /// Clear the failure count, returning whether there was one to clear
    pub fn reset(&mut self) -> bool {
        std::mem::take(&mut self.failures) > 0
    }

    /// Consecutive failures since the last reset
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn is_exhausted(&self) -> bool {
        self.failures > self.max_retries
    }
}
