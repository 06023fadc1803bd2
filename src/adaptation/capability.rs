//! Per-mode capability scoring
//!
//! Scores are recomputed from the context on every call and never cached.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{ModeHeuristics, ScoringWeights};
use crate::domain::{
    AccessibilityRequirement, DeviceType, EnvironmentalFactors, InputMode, InteractionContext,
    LightingCondition, NetworkQuality, NoiseLevel, WorkMode,
};

/// How well one input mode fits the current context; all values in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputMethodCapability {
    pub mode: InputMode,
    pub reliability: f64,
    pub efficiency: f64,
    pub accessibility: f64,
    pub environmental_suitability: f64,
    pub score: f64,
}

/// Score a mode against the context
pub fn assess(
    mode: InputMode,
    context: &InteractionContext,
    heuristics: &ModeHeuristics,
    weights: &ScoringWeights,
) -> InputMethodCapability {
    let env = &context.environmental_factors;
    let reliability = reliability(mode, env, heuristics);
    let efficiency = efficiency(mode, context.work_context.work_mode);
    let accessibility = accessibility(mode, &context.user_preferences.accessibility_needs);
    let environmental_suitability = environmental_suitability(mode, env);

    let total = weights.total();
    let weighted = weights.reliability * reliability
        + weights.efficiency * efficiency
        + weights.accessibility * accessibility
        + weights.environmental * environmental_suitability;
    let score = if total > 0.0 { weighted / total } else { 0.0 };

    InputMethodCapability {
        mode,
        reliability,
        efficiency,
        accessibility,
        environmental_suitability,
        score: score.clamp(0.0, 1.0),
    }
}

fn reliability(mode: InputMode, env: &EnvironmentalFactors, h: &ModeHeuristics) -> f64 {
    match mode {
        InputMode::Keyboard => 0.95,
        InputMode::Mouse => 0.9,
        InputMode::Touch => match env.device_type {
            DeviceType::Desktop => h.touch_desktop_reliability,
            DeviceType::Laptop => h.touch_laptop_reliability,
            DeviceType::Tablet | DeviceType::Mobile => h.touch_handheld_reliability,
        },
        InputMode::Voice => {
            if env.is_in_meeting {
                return h.voice_meeting_reliability;
            }
            let base = match env.noise_level {
                NoiseLevel::Quiet => h.voice_quiet_reliability,
                NoiseLevel::Moderate => h.voice_moderate_reliability,
                NoiseLevel::Loud => h.voice_loud_reliability,
                NoiseLevel::VeryLoud => h.voice_very_loud_reliability,
            };
            match env.network_quality {
                NetworkQuality::Poor | NetworkQuality::Offline => base * h.voice_poor_network_factor,
                _ => base,
            }
        }
        InputMode::Gesture => {
            if env.lighting_condition.is_low_light() {
                h.gesture_low_light_reliability
            } else {
                h.gesture_reliability
            }
        }
        InputMode::EyeTracking => match env.lighting_condition {
            LightingCondition::Dark => h.eye_tracking_reliability * 0.5,
            _ => h.eye_tracking_reliability,
        },
    }
}

fn efficiency(mode: InputMode, work_mode: WorkMode) -> f64 {
    // keyboard, mouse, touch, voice, gesture, eye tracking
    let row: [f64; 6] = match work_mode {
        WorkMode::Focus => [0.95, 0.7, 0.5, 0.6, 0.4, 0.5],
        WorkMode::Collaboration => [0.7, 0.75, 0.7, 0.8, 0.7, 0.4],
        WorkMode::Research => [0.85, 0.85, 0.6, 0.7, 0.5, 0.6],
        WorkMode::Creative => [0.6, 0.85, 0.9, 0.6, 0.8, 0.5],
        WorkMode::Administrative => [0.9, 0.8, 0.6, 0.75, 0.4, 0.4],
    };
    row[mode_index(mode)]
}

fn accessibility(mode: InputMode, needs: &BTreeSet<AccessibilityRequirement>) -> f64 {
    // keyboard, mouse, touch, voice, gesture, eye tracking
    const BASE: [f64; 6] = [0.8, 0.7, 0.75, 0.85, 0.6, 0.7];

    // With several needs the most restrictive one wins.
    let index = mode_index(mode);
    if needs.is_empty() {
        return BASE[index];
    }
    needs
        .iter()
        .map(|need| {
            let row: [f64; 6] = match need {
                AccessibilityRequirement::VoiceOnly => [0.1, 0.1, 0.1, 1.0, 0.1, 0.1],
                AccessibilityRequirement::KeyboardOnly => [1.0, 0.1, 0.1, 0.1, 0.1, 0.1],
                AccessibilityRequirement::MotorImpairment => [0.4, 0.3, 0.4, 0.95, 0.3, 0.95],
                AccessibilityRequirement::VisualImpairment => [0.85, 0.3, 0.4, 0.95, 0.3, 0.2],
                AccessibilityRequirement::HearingImpairment => BASE,
            };
            row[index]
        })
        .fold(1.0, f64::min)
}

fn environmental_suitability(mode: InputMode, env: &EnvironmentalFactors) -> f64 {
    match mode {
        InputMode::Keyboard => {
            if env.device_type == DeviceType::Mobile {
                0.4
            } else {
                0.9
            }
        }
        InputMode::Mouse => {
            if env.device_type.is_handheld() {
                0.2
            } else {
                0.9
            }
        }
        InputMode::Touch => match env.device_type {
            DeviceType::Tablet | DeviceType::Mobile => 1.0,
            DeviceType::Laptop => 0.4,
            DeviceType::Desktop => 0.2,
        },
        InputMode::Voice => {
            if env.is_in_meeting {
                return 0.0;
            }
            match env.noise_level {
                NoiseLevel::Quiet => 1.0,
                NoiseLevel::Moderate => 0.7,
                NoiseLevel::Loud => 0.3,
                NoiseLevel::VeryLoud => 0.1,
            }
        }
        InputMode::Gesture => {
            let light: f64 = match env.lighting_condition {
                LightingCondition::Bright => 0.9,
                LightingCondition::Normal => 0.8,
                LightingCondition::Dim => 0.4,
                LightingCondition::Dark => 0.2,
            };
            if env.is_in_meeting { light.min(0.6) } else { light }
        }
        InputMode::EyeTracking => match env.lighting_condition {
            LightingCondition::Dark => 0.2,
            LightingCondition::Dim => 0.5,
            _ => 0.8,
        },
    }
}

fn mode_index(mode: InputMode) -> usize {
    match mode {
        InputMode::Keyboard => 0,
        InputMode::Mouse => 1,
        InputMode::Touch => 2,
        InputMode::Voice => 3,
        InputMode::Gesture => 4,
        InputMode::EyeTracking => 5,
    }
}
