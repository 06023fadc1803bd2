//! Contextual override rules

use std::sync::Arc;

use crate::domain::{
    AccessibilityRequirement, InputMode, InteractionContext, LightingCondition,
};

pub type RuleCondition = Arc<dyn Fn(&InteractionContext) -> bool + Send + Sync>;

/// A priority-ordered override that recommends modes under specific conditions
#[derive(Clone)]
pub struct ContextualRule {
    pub name: String,
    condition: RuleCondition,
    pub recommended_modes: Vec<InputMode>,
    pub priority: i32,
    pub reason: String,
}

impl ContextualRule {
    pub fn new(
        name: impl Into<String>,
        priority: i32,
        recommended_modes: Vec<InputMode>,
        reason: impl Into<String>,
        condition: impl Fn(&InteractionContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            condition: Arc::new(condition),
            recommended_modes,
            priority,
            reason: reason.into(),
        }
    }

    pub fn applies(&self, context: &InteractionContext) -> bool {
        (self.condition)(context)
    }

    /// First recommended mode the context can actually use
    pub fn first_usable(&self, context: &InteractionContext) -> Option<InputMode> {
        self.recommended_modes
            .iter()
            .copied()
            .find(|mode| context.is_usable(*mode))
    }
}

impl std::fmt::Debug for ContextualRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextualRule")
            .field("name", &self.name)
            .field("recommended_modes", &self.recommended_modes)
            .field("priority", &self.priority)
            .field("reason", &self.reason)
            .finish()
    }
}

fn needs(context: &InteractionContext, requirement: AccessibilityRequirement) -> bool {
    context.user_preferences.accessibility_needs.contains(&requirement)
}

/// Built-in rules, in declaration order (which breaks priority ties)
pub fn default_rules() -> Vec<ContextualRule> {
    use InputMode::*;

    vec![
        ContextualRule::new(
            "accessibility_voice_only",
            15,
            vec![Voice],
            "Accessibility requirement: voice-only input",
            |ctx| needs(ctx, AccessibilityRequirement::VoiceOnly),
        ),
        ContextualRule::new(
            "accessibility_keyboard_only",
            15,
            vec![Keyboard],
            "Accessibility requirement: keyboard-only input",
            |ctx| needs(ctx, AccessibilityRequirement::KeyboardOnly),
        ),
        ContextualRule::new(
            "accessibility_motor",
            12,
            vec![Voice, EyeTracking, Keyboard],
            "Motor impairment: favoring hands-free input",
            |ctx| needs(ctx, AccessibilityRequirement::MotorImpairment),
        ),
        ContextualRule::new(
            "accessibility_visual",
            12,
            vec![Voice, Keyboard],
            "Visual impairment: favoring non-pointing input",
            |ctx| needs(ctx, AccessibilityRequirement::VisualImpairment),
        ),
        ContextualRule::new(
            "meeting",
            10,
            vec![Keyboard, Mouse, Gesture],
            "In a meeting: avoiding voice input to prevent disruption",
            |ctx| ctx.environmental_factors.is_in_meeting,
        ),
        ContextualRule::new(
            "noisy_environment",
            8,
            vec![Keyboard, Touch, Gesture],
            "High ambient noise: voice recognition is unreliable",
            |ctx| ctx.environmental_factors.noise_level.is_loud(),
        ),
        ContextualRule::new(
            "dark_environment",
            6,
            vec![Keyboard, Voice, Mouse],
            "Low light: gesture tracking is unreliable",
            |ctx| ctx.environmental_factors.lighting_condition == LightingCondition::Dark,
        ),
        ContextualRule::new(
            "handheld_device",
            5,
            vec![Touch, Voice, Keyboard],
            "Handheld device: touch is the native input",
            |ctx| ctx.environmental_factors.device_type.is_handheld(),
        ),
    ]
}
