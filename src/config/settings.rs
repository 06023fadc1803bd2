//! Settings configuration types

mod adaptation;
mod gesture;
mod heuristics;
mod orchestrator;
mod voice;

pub use adaptation::{AdaptationSettings, ScoringWeights};
pub use gesture::{GestureComplexity, GestureSettings};
pub use heuristics::ModeHeuristics;
pub use orchestrator::OrchestratorSettings;
pub use voice::VoiceSettings;

use serde::{Deserialize, Serialize};

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Input-mode adaptation
    #[serde(default)]
    pub adaptation: AdaptationSettings,

    /// Capability heuristic constants
    #[serde(default)]
    pub heuristics: ModeHeuristics,

    /// Gesture recognition
    #[serde(default)]
    pub gesture: GestureSettings,

    /// Voice channel
    #[serde(default)]
    pub voice: VoiceSettings,

    /// Command history and metrics
    #[serde(default)]
    pub orchestrator: OrchestratorSettings,
}
