use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::input::{
    AccessibilityRequirement, DeviceType, InputMode, LightingCondition, NetworkQuality, NoiseLevel,
    WorkMode,
};

/// What the user is currently working on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkContext {
    pub current_task: Option<String>,
    pub current_project: Option<String>,
    #[serde(default)]
    pub active_applications: Vec<String>,
    /// "morning", "afternoon", "evening" or "night"
    pub time_of_day: String,
    pub work_mode: WorkMode,
}

impl Default for WorkContext {
    fn default() -> Self {
        Self {
            current_task: None,
            current_project: None,
            active_applications: Vec::new(),
            time_of_day: "morning".to_string(),
            work_mode: WorkMode::default(),
        }
    }
}

/// User input preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Preferred input methods, most preferred first
    #[serde(default = "default_preferred_input_methods")]
    pub preferred_input_methods: Vec<InputMode>,

    /// BCP-47 language tag handed to the speech provider
    #[serde(default = "default_voice_language")]
    pub voice_language: String,

    #[serde(default = "default_gesture_enabled")]
    pub gesture_enabled: bool,

    #[serde(default)]
    pub accessibility_needs: BTreeSet<AccessibilityRequirement>,

    /// Modes the user never wants selected
    #[serde(default)]
    pub disabled_modes: BTreeSet<InputMode>,
}

fn default_preferred_input_methods() -> Vec<InputMode> {
    vec![InputMode::Keyboard, InputMode::Mouse]
}

fn default_voice_language() -> String {
    "en-US".to_string()
}

fn default_gesture_enabled() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            preferred_input_methods: default_preferred_input_methods(),
            voice_language: default_voice_language(),
            gesture_enabled: default_gesture_enabled(),
            accessibility_needs: BTreeSet::new(),
            disabled_modes: BTreeSet::new(),
        }
    }
}

impl UserPreferences {
    /// Merge a partial update; fields left as `None` keep their current value
    pub fn apply(&mut self, update: PreferencesUpdate) {
        if let Some(preferred) = update.preferred_input_methods {
            self.preferred_input_methods = preferred;
        }
        if let Some(language) = update.voice_language {
            self.voice_language = language;
        }
        if let Some(enabled) = update.gesture_enabled {
            self.gesture_enabled = enabled;
        }
        if let Some(needs) = update.accessibility_needs {
            self.accessibility_needs = needs;
        }
        if let Some(disabled) = update.disabled_modes {
            self.disabled_modes = disabled;
        }
    }

    /// True if the user has not ruled this mode out
    pub fn allows(&self, mode: InputMode) -> bool {
        if self.disabled_modes.contains(&mode) {
            return false;
        }
        !(mode == InputMode::Gesture && !self.gesture_enabled)
    }
}

/// Partial preferences, merged into the current ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    pub preferred_input_methods: Option<Vec<InputMode>>,
    pub voice_language: Option<String>,
    pub gesture_enabled: Option<bool>,
    pub accessibility_needs: Option<BTreeSet<AccessibilityRequirement>>,
    pub disabled_modes: Option<BTreeSet<InputMode>>,
}

impl PreferencesUpdate {
    pub fn voice_language(language: impl Into<String>) -> Self {
        Self {
            voice_language: Some(language.into()),
            ..Self::default()
        }
    }
}

/// Sensed environment around the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentalFactors {
    pub is_in_meeting: bool,
    pub noise_level: NoiseLevel,
    pub lighting_condition: LightingCondition,
    pub device_type: DeviceType,
    pub network_quality: NetworkQuality,
}

/// Everything the mode selector looks at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionContext {
    pub current_mode: InputMode,
    pub available_modes: BTreeSet<InputMode>,
    pub work_context: WorkContext,
    pub user_preferences: UserPreferences,
    pub environmental_factors: EnvironmentalFactors,
}

impl Default for InteractionContext {
    fn default() -> Self {
        Self::new(BTreeSet::new())
    }
}

impl InteractionContext {
    /// Create a context for the given modes. Keyboard and mouse are always
    /// added, and keyboard is the initial mode.
    pub fn new(available_modes: BTreeSet<InputMode>) -> Self {
        let mut context = Self {
            current_mode: InputMode::Keyboard,
            available_modes: BTreeSet::new(),
            work_context: WorkContext::default(),
            user_preferences: UserPreferences::default(),
            environmental_factors: EnvironmentalFactors::default(),
        };
        context.set_available_modes(available_modes);
        context
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.user_preferences = preferences;
        self
    }

    pub fn with_environment(mut self, factors: EnvironmentalFactors) -> Self {
        self.environmental_factors = factors;
        self
    }

    pub fn with_work_mode(mut self, work_mode: WorkMode) -> Self {
        self.work_context.work_mode = work_mode;
        self
    }

    /// Replace the available modes, keeping `current_mode` inside the set
    pub fn set_available_modes(&mut self, modes: BTreeSet<InputMode>) {
        self.available_modes = modes;
        self.available_modes.insert(InputMode::Keyboard);
        self.available_modes.insert(InputMode::Mouse);
        if !self.available_modes.contains(&self.current_mode) {
            self.current_mode = InputMode::Keyboard;
        }
    }

    pub fn is_available(&self, mode: InputMode) -> bool {
        self.available_modes.contains(&mode)
    }

    /// Available and not disabled by the user
    pub fn is_usable(&self, mode: InputMode) -> bool {
        self.is_available(mode) && self.user_preferences.allows(mode)
    }
}
