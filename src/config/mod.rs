//! Configuration loading and management

mod settings;

pub use settings::{
    AdaptationSettings, GestureComplexity, GestureSettings, ModeHeuristics, OrchestratorSettings,
    ScoringWeights, Settings, VoiceSettings,
};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::UserPreferences;

/// Main configuration structure
///
/// Constructed once by the application and handed to the orchestrator;
/// nothing reads configuration from global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Initial user preferences
    #[serde(default)]
    pub preferences: UserPreferences,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for: .neuralflow/config.toml, then the user config dir
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let local_path = Self::local_path(dir);
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        if let Some(global_path) = Self::global_path() {
            if global_path.exists() {
                return Self::from_file(&global_path);
            }
        }

        Ok(Self::default())
    }

    /// Path of the per-directory config file
    pub fn local_path(dir: &Path) -> PathBuf {
        dir.join(".neuralflow").join("config.toml")
    }

    /// Path of the per-user config file, if the platform has a config dir
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("neuralflow").join("config.toml"))
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        let weights = &self.settings.adaptation.weights;
        let all_weights = [
            weights.reliability,
            weights.efficiency,
            weights.accessibility,
            weights.environmental,
        ];
        if all_weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            bail!("adaptation weights must be non-negative numbers");
        }
        if weights.total() <= 0.0 {
            bail!("adaptation weights must not all be zero");
        }
        if self.settings.adaptation.refresh_interval_secs == 0 {
            bail!("adaptation.refresh_interval_secs must be at least 1");
        }
        if self.settings.orchestrator.command_history_capacity == 0 {
            bail!("orchestrator.command_history_capacity must be at least 1");
        }
        let alpha = self.settings.orchestrator.response_time_alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            bail!("orchestrator.response_time_alpha must be in (0, 1]");
        }
        Ok(())
    }
}
