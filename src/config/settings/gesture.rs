//! Gesture recognition settings

use serde::{Deserialize, Serialize};

/// Gesture recognition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureSettings {
    /// Minimum time between two emitted gestures (in ms)
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    /// Maximum thumb-tip to index-tip distance for an OK sign (normalized coordinates)
    #[serde(default = "default_ok_sign_threshold")]
    pub ok_sign_threshold: f64,

    /// Minimum wrist travel for a swipe (normalized coordinates)
    #[serde(default = "default_swipe_distance")]
    pub swipe_distance: f64,

    /// Maximum duration of a swipe (in ms)
    #[serde(default = "default_swipe_window_ms")]
    pub swipe_window_ms: u64,

    /// Per-gesture confidence multipliers
    #[serde(default)]
    pub complexity: GestureComplexity,
}

fn default_throttle_ms() -> u64 {
    100
}

fn default_ok_sign_threshold() -> f64 {
    0.05
}

fn default_swipe_distance() -> f64 {
    0.25
}

fn default_swipe_window_ms() -> u64 {
    300
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            throttle_ms: default_throttle_ms(),
            ok_sign_threshold: default_ok_sign_threshold(),
            swipe_distance: default_swipe_distance(),
            swipe_window_ms: default_swipe_window_ms(),
            complexity: GestureComplexity::default(),
        }
    }
}

/// Confidence multiplier per gesture type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureComplexity {
    #[serde(default = "default_point")]
    pub point: f64,
    #[serde(default = "default_thumbs_up")]
    pub thumbs_up: f64,
    #[serde(default = "default_peace_sign")]
    pub peace_sign: f64,
    #[serde(default = "default_ok_sign")]
    pub ok_sign: f64,
    #[serde(default = "default_grab")]
    pub grab: f64,
    #[serde(default = "default_release")]
    pub release: f64,
    #[serde(default = "default_swipe")]
    pub swipe: f64,
}

fn default_point() -> f64 {
    0.9
}

fn default_thumbs_up() -> f64 {
    0.95
}

fn default_peace_sign() -> f64 {
    0.85
}

fn default_ok_sign() -> f64 {
    0.8
}

fn default_grab() -> f64 {
    0.9
}

fn default_release() -> f64 {
    0.85
}

fn default_swipe() -> f64 {
    0.8
}

impl Default for GestureComplexity {
    fn default() -> Self {
        Self {
            point: default_point(),
            thumbs_up: default_thumbs_up(),
            peace_sign: default_peace_sign(),
            ok_sign: default_ok_sign(),
            grab: default_grab(),
            release: default_release(),
            swipe: default_swipe(),
        }
    }
}
