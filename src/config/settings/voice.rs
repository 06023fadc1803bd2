//! Voice channel settings

use serde::{Deserialize, Serialize};

/// Voice channel settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Keep the recognizer running between utterances
    #[serde(default = "default_continuous")]
    pub continuous: bool,

    /// Restart the recognizer after transient errors (no speech, audio capture)
    #[serde(default = "default_auto_restart")]
    pub auto_restart: bool,

    /// Delay before an automatic restart (in ms)
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

fn default_continuous() -> bool {
    true
}

fn default_auto_restart() -> bool {
    true
}

fn default_restart_delay_ms() -> u64 {
    1000
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            continuous: default_continuous(),
            auto_restart: default_auto_restart(),
            restart_delay_ms: default_restart_delay_ms(),
        }
    }
}
