//! Input-mode adaptation settings

use serde::{Deserialize, Serialize};

/// Input-mode adaptation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationSettings {
    /// Re-select the input mode on every context refresh
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between context refreshes
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Number of adaptation records kept (oldest dropped first)
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// A preferred mode is only taken over the best-scoring one if it scores at least this
    #[serde(default = "default_min_preferred_score")]
    pub min_preferred_score: f64,

    /// Weights of the capability sub-scores
    #[serde(default)]
    pub weights: ScoringWeights,
}

fn default_enabled() -> bool {
    true
}

fn default_refresh_interval_secs() -> u64 {
    5
}

fn default_history_capacity() -> usize {
    100
}

fn default_min_preferred_score() -> f64 {
    0.5
}

impl Default for AdaptationSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            refresh_interval_secs: default_refresh_interval_secs(),
            history_capacity: default_history_capacity(),
            min_preferred_score: default_min_preferred_score(),
            weights: ScoringWeights::default(),
        }
    }
}

/// Weights of the four capability sub-scores. Should sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_reliability_weight")]
    pub reliability: f64,
    #[serde(default = "default_efficiency_weight")]
    pub efficiency: f64,
    #[serde(default = "default_accessibility_weight")]
    pub accessibility: f64,
    #[serde(default = "default_environmental_weight")]
    pub environmental: f64,
}

fn default_reliability_weight() -> f64 {
    0.30
}

fn default_efficiency_weight() -> f64 {
    0.25
}

fn default_accessibility_weight() -> f64 {
    0.25
}

fn default_environmental_weight() -> f64 {
    0.20
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            reliability: default_reliability_weight(),
            efficiency: default_efficiency_weight(),
            accessibility: default_accessibility_weight(),
            environmental: default_environmental_weight(),
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.reliability + self.efficiency + self.accessibility + self.environmental
    }
}
