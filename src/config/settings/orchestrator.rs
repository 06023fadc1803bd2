//! Multi-modal orchestrator settings

use serde::{Deserialize, Serialize};

/// Multi-modal orchestrator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorSettings {
    /// Recognized commands kept in history (oldest dropped first)
    #[serde(default = "default_command_history_capacity")]
    pub command_history_capacity: usize,

    /// Normalized inputs kept by the intent extractor
    #[serde(default = "default_intent_history_capacity")]
    pub intent_history_capacity: usize,

    /// Number of recent outcomes the error rate is computed over
    #[serde(default = "default_error_window")]
    pub error_window: usize,

    /// Smoothing factor of the average response time
    #[serde(default = "default_response_time_alpha")]
    pub response_time_alpha: f64,
}

fn default_command_history_capacity() -> usize {
    100
}

fn default_intent_history_capacity() -> usize {
    10
}

fn default_error_window() -> usize {
    100
}

fn default_response_time_alpha() -> f64 {
    0.1
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            command_history_capacity: default_command_history_capacity(),
            intent_history_capacity: default_intent_history_capacity(),
            error_window: default_error_window(),
            response_time_alpha: default_response_time_alpha(),
        }
    }
}
