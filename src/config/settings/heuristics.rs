//! Tunable constants of the capability heuristics
//!
//! Hand-tuned values. They are exposed so a deployment can adjust them without touching the
//! selector.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeHeuristics {
    /// Voice reliability while in a meeting
    #[serde(default = "default_voice_meeting_reliability")]
    pub voice_meeting_reliability: f64,

    #[serde(default = "default_voice_quiet_reliability")]
    pub voice_quiet_reliability: f64,

    #[serde(default = "default_voice_moderate_reliability")]
    pub voice_moderate_reliability: f64,

    #[serde(default = "default_voice_loud_reliability")]
    pub voice_loud_reliability: f64,

    #[serde(default = "default_voice_very_loud_reliability")]
    pub voice_very_loud_reliability: f64,

    /// Multiplier on voice reliability when the network is poor or offline
    #[serde(default = "default_voice_poor_network_factor")]
    pub voice_poor_network_factor: f64,

    #[serde(default = "default_gesture_reliability")]
    pub gesture_reliability: f64,

    /// Gesture reliability in dim or dark light
    #[serde(default = "default_gesture_low_light_reliability")]
    pub gesture_low_light_reliability: f64,

    #[serde(default = "default_touch_desktop_reliability")]
    pub touch_desktop_reliability: f64,

    #[serde(default = "default_touch_laptop_reliability")]
    pub touch_laptop_reliability: f64,

    /// Touch reliability on phones and tablets
    #[serde(default = "default_touch_handheld_reliability")]
    pub touch_handheld_reliability: f64,

    #[serde(default = "default_eye_tracking_reliability")]
    pub eye_tracking_reliability: f64,
}

fn default_voice_meeting_reliability() -> f64 {
    0.1
}

fn default_voice_quiet_reliability() -> f64 {
    0.9
}

fn default_voice_moderate_reliability() -> f64 {
    0.75
}

fn default_voice_loud_reliability() -> f64 {
    0.3
}

fn default_voice_very_loud_reliability() -> f64 {
    0.3
}

fn default_voice_poor_network_factor() -> f64 {
    0.8
}

fn default_gesture_reliability() -> f64 {
    0.75
}

fn default_gesture_low_light_reliability() -> f64 {
    0.4
}

fn default_touch_desktop_reliability() -> f64 {
    0.3
}

fn default_touch_laptop_reliability() -> f64 {
    0.5
}

fn default_touch_handheld_reliability() -> f64 {
    0.9
}

fn default_eye_tracking_reliability() -> f64 {
    0.6
}

impl Default for ModeHeuristics {
    fn default() -> Self {
        Self {
            voice_meeting_reliability: default_voice_meeting_reliability(),
            voice_quiet_reliability: default_voice_quiet_reliability(),
            voice_moderate_reliability: default_voice_moderate_reliability(),
            voice_loud_reliability: default_voice_loud_reliability(),
            voice_very_loud_reliability: default_voice_very_loud_reliability(),
            voice_poor_network_factor: default_voice_poor_network_factor(),
            gesture_reliability: default_gesture_reliability(),
            gesture_low_light_reliability: default_gesture_low_light_reliability(),
            touch_desktop_reliability: default_touch_desktop_reliability(),
            touch_laptop_reliability: default_touch_laptop_reliability(),
            touch_handheld_reliability: default_touch_handheld_reliability(),
            eye_tracking_reliability: default_eye_tracking_reliability(),
        }
    }
}
