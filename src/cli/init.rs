//! Init command implementation

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use neuralflow::config::Config;

/// Default configuration content for neuralflow init
pub const DEFAULT_CONFIG: &str = r#"# Neural Flow Configuration
# ==========================
#
# Every value below is the built-in default; delete a line to keep it.

# ============================================================================
# ADAPTATION - How the active input mode is chosen
# ============================================================================
#
#   enabled               - Re-select the input mode on every context refresh
#   refresh_interval_secs - Seconds between environment samples
#   history_capacity      - Mode changes remembered
#   min_preferred_score   - A preferred mode must score at least this to win

[settings.adaptation]
enabled = true
refresh_interval_secs = 5
history_capacity = 100
min_preferred_score = 0.5

# Weights of the capability sub-scores (should sum to 1.0)
[settings.adaptation.weights]
reliability = 0.30
efficiency = 0.25
accessibility = 0.25
environmental = 0.20

# Hand-tuned reliability estimates per mode and environment
[settings.heuristics]
voice_meeting_reliability = 0.1
voice_quiet_reliability = 0.9
voice_moderate_reliability = 0.75
voice_loud_reliability = 0.3
voice_very_loud_reliability = 0.3
voice_poor_network_factor = 0.8
gesture_reliability = 0.75
gesture_low_light_reliability = 0.4
touch_desktop_reliability = 0.3
touch_laptop_reliability = 0.5
touch_handheld_reliability = 0.9
eye_tracking_reliability = 0.6

# ============================================================================
# RECOGNITION - Gesture and voice channels
# ============================================================================

[settings.gesture]
# Minimum time between two recognized gestures
throttle_ms = 100
ok_sign_threshold = 0.05
# Wrist travel (normalized) within swipe_window_ms that counts as a swipe
swipe_distance = 0.25
swipe_window_ms = 300

# Confidence multiplier per gesture
[settings.gesture.complexity]
point = 0.9
thumbs_up = 0.95
peace_sign = 0.85
ok_sign = 0.8
grab = 0.9
release = 0.85
swipe = 0.8

[settings.voice]
continuous = true
# Restart after "no speech" and audio capture errors
auto_restart = true
restart_delay_ms = 1000

[settings.orchestrator]
command_history_capacity = 100
intent_history_capacity = 10
# Recent outcomes the error rate is computed over
error_window = 100
response_time_alpha = 0.1

# ============================================================================
# PREFERENCES - Initial user preferences
# ============================================================================
#
#   preferred_input_methods - keyboard, mouse, touch, voice, gesture, eye_tracking
#   accessibility_needs     - voice_only, keyboard_only, motor_impairment,
#                             visual_impairment, hearing_impairment
#   disabled_modes          - modes that are never selected

[preferences]
preferred_input_methods = ["keyboard", "mouse"]
voice_language = "en-US"
gesture_enabled = true
accessibility_needs = []
disabled_modes = []
"#;

/// Write the default config to `config_path`, or `.neuralflow/config.toml`
/// under `work_dir`
pub async fn init_command(work_dir: &Path, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| Config::local_path(work_dir));

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    // Create parent directory (if any)
    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created: {}", config_path.display());

    Ok(())
}
