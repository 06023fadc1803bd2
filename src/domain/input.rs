use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A channel through which the user issues commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    Keyboard,
    Mouse,
    Touch,
    Voice,
    Gesture,
    EyeTracking,
}

impl InputMode {
    /// Every mode, in declaration order (used as the scoring tie-break order)
    pub const ALL: [InputMode; 6] = [
        InputMode::Keyboard,
        InputMode::Mouse,
        InputMode::Touch,
        InputMode::Voice,
        InputMode::Gesture,
        InputMode::EyeTracking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Keyboard => "keyboard",
            InputMode::Mouse => "mouse",
            InputMode::Touch => "touch",
            InputMode::Voice => "voice",
            InputMode::Gesture => "gesture",
            InputMode::EyeTracking => "eye_tracking",
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "keyboard" => Ok(InputMode::Keyboard),
            "mouse" => Ok(InputMode::Mouse),
            "touch" => Ok(InputMode::Touch),
            "voice" => Ok(InputMode::Voice),
            "gesture" => Ok(InputMode::Gesture),
            "eye_tracking" | "eye" => Ok(InputMode::EyeTracking),
            other => Err(format!("Unknown input mode: {}", other)),
        }
    }
}

/// The user's declared activity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkMode {
    #[default]
    Focus,
    Collaboration,
    Research,
    Creative,
    Administrative,
}

impl WorkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkMode::Focus => "focus",
            WorkMode::Collaboration => "collaboration",
            WorkMode::Research => "research",
            WorkMode::Creative => "creative",
            WorkMode::Administrative => "administrative",
        }
    }
}

impl std::fmt::Display for WorkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WorkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "focus" => Ok(WorkMode::Focus),
            "collaboration" => Ok(WorkMode::Collaboration),
            "research" => Ok(WorkMode::Research),
            "creative" => Ok(WorkMode::Creative),
            "administrative" | "admin" => Ok(WorkMode::Administrative),
            other => Err(format!("Unknown work mode: {}", other)),
        }
    }
}

/// Coarse ambient noise bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseLevel {
    #[default]
    Quiet,
    Moderate,
    Loud,
    VeryLoud,
}

impl NoiseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseLevel::Quiet => "quiet",
            NoiseLevel::Moderate => "moderate",
            NoiseLevel::Loud => "loud",
            NoiseLevel::VeryLoud => "very_loud",
        }
    }

    /// Loud or very loud
    pub fn is_loud(&self) -> bool {
        matches!(self, NoiseLevel::Loud | NoiseLevel::VeryLoud)
    }
}

impl std::fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NoiseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "quiet" => Ok(NoiseLevel::Quiet),
            "moderate" => Ok(NoiseLevel::Moderate),
            "loud" => Ok(NoiseLevel::Loud),
            "very_loud" => Ok(NoiseLevel::VeryLoud),
            other => Err(format!("Unknown noise level: {}", other)),
        }
    }
}

/// Coarse lighting bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingCondition {
    Bright,
    #[default]
    Normal,
    Dim,
    Dark,
}

impl LightingCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightingCondition::Bright => "bright",
            LightingCondition::Normal => "normal",
            LightingCondition::Dim => "dim",
            LightingCondition::Dark => "dark",
        }
    }

    /// Dim or dark
    pub fn is_low_light(&self) -> bool {
        matches!(self, LightingCondition::Dim | LightingCondition::Dark)
    }
}

impl std::fmt::Display for LightingCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LightingCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bright" => Ok(LightingCondition::Bright),
            "normal" => Ok(LightingCondition::Normal),
            "dim" => Ok(LightingCondition::Dim),
            "dark" => Ok(LightingCondition::Dark),
            other => Err(format!("Unknown lighting condition: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    #[default]
    Desktop,
    Laptop,
    Tablet,
    Mobile,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Laptop => "laptop",
            DeviceType::Tablet => "tablet",
            DeviceType::Mobile => "mobile",
        }
    }

    /// Phones and tablets, where touch is the native input
    pub fn is_handheld(&self) -> bool {
        matches!(self, DeviceType::Tablet | DeviceType::Mobile)
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Ok(DeviceType::Desktop),
            "laptop" => Ok(DeviceType::Laptop),
            "tablet" => Ok(DeviceType::Tablet),
            "mobile" | "phone" => Ok(DeviceType::Mobile),
            other => Err(format!("Unknown device type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkQuality {
    Excellent,
    #[default]
    Good,
    Poor,
    Offline,
}

impl NetworkQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkQuality::Excellent => "excellent",
            NetworkQuality::Good => "good",
            NetworkQuality::Poor => "poor",
            NetworkQuality::Offline => "offline",
        }
    }
}

impl std::fmt::Display for NetworkQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Accessibility needs that constrain input selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilityRequirement {
    VoiceOnly,
    KeyboardOnly,
    MotorImpairment,
    VisualImpairment,
    HearingImpairment,
}

impl AccessibilityRequirement {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessibilityRequirement::VoiceOnly => "voice_only",
            AccessibilityRequirement::KeyboardOnly => "keyboard_only",
            AccessibilityRequirement::MotorImpairment => "motor_impairment",
            AccessibilityRequirement::VisualImpairment => "visual_impairment",
            AccessibilityRequirement::HearingImpairment => "hearing_impairment",
        }
    }
}

impl std::fmt::Display for AccessibilityRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
