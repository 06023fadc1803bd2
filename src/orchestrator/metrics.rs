//! Running performance counters

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::OrchestratorSettings;

/// Snapshot of the orchestrator's performance counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub commands_processed: u64,
    /// Exponential moving average of recognition-to-dispatch latency
    pub average_response_time_ms: f64,
    /// Share of failed outcomes among the most recent ones
    pub error_rate: f64,
    pub errors_total: u64,
}

/// Accumulates outcomes into [`PerformanceMetrics`]
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    alpha: f64,
    window: VecDeque<bool>,
    window_size: usize,
    metrics: PerformanceMetrics,
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new(&OrchestratorSettings::default())
    }
}

impl MetricsTracker {
    pub fn new(settings: &OrchestratorSettings) -> Self {
        Self {
            alpha: settings.response_time_alpha,
            window: VecDeque::new(),
            window_size: settings.error_window.max(1),
            metrics: PerformanceMetrics::default(),
        }
    }

    /// Count a dispatched command and fold its latency into the average
    pub fn record_command(&mut self, elapsed: Duration) {
        let sample = elapsed.as_secs_f64() * 1000.0;
        self.metrics.average_response_time_ms = if self.metrics.commands_processed == 0 {
            sample
        } else {
            self.alpha * sample + (1.0 - self.alpha) * self.metrics.average_response_time_ms
        };
        self.metrics.commands_processed += 1;
        self.push_outcome(false);
    }

    pub fn record_error(&mut self) {
        self.metrics.errors_total += 1;
        self.push_outcome(true);
    }

    pub fn snapshot(&self) -> PerformanceMetrics {
        self.metrics
    }

    fn push_outcome(&mut self, failed: bool) {
        if self.window.len() >= self.window_size {
            self.window.pop_front();
        }
        self.window.push_back(failed);

        let failures = self.window.iter().filter(|failed| **failed).count();
        self.metrics.error_rate = failures as f64 / self.window.len() as f64;
    }
}
