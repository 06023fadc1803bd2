//! Input mode selection and adaptation

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::capability::{InputMethodCapability, assess};
use super::rules::{ContextualRule, default_rules};
use crate::config::{AdaptationSettings, ModeHeuristics, ScoringWeights};
use crate::domain::{InputMode, InteractionContext};

/// Confidence reported when a contextual rule forces the mode
pub const RULE_CONFIDENCE: f64 = 0.9;

/// Confidence reported when nothing is usable and keyboard is assumed
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Why a mode was recommended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationSource {
    /// A contextual rule forced the mode
    Rule { name: String },
    /// The user's preferred mode scored well enough
    Preference,
    /// Highest capability score
    Score,
    /// No usable mode, keyboard assumed
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeRecommendation {
    pub mode: InputMode,
    pub reason: String,
    pub confidence: f64,
    pub source: RecommendationSource,
}

/// One entry of the adaptation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeChange {
    pub from: InputMode,
    pub to: InputMode,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Called with the new mode and a human-readable reason
pub type ModeChangeCallback = Box<dyn FnMut(InputMode, &str) + Send>;

/// Scores and selects the single active input mode
pub struct InputModeSelector {
    rules: Vec<ContextualRule>,
    heuristics: ModeHeuristics,
    weights: ScoringWeights,
    min_preferred_score: f64,
    history: VecDeque<ModeChange>,
    history_capacity: usize,
    on_change: Option<ModeChangeCallback>,
}

impl Default for InputModeSelector {
    fn default() -> Self {
        Self::new(&AdaptationSettings::default(), ModeHeuristics::default())
    }
}

impl InputModeSelector {
    /// Create a selector with the built-in contextual rules
    pub fn new(settings: &AdaptationSettings, heuristics: ModeHeuristics) -> Self {
        Self {
            rules: default_rules(),
            heuristics,
            weights: settings.weights,
            min_preferred_score: settings.min_preferred_score,
            history: VecDeque::new(),
            history_capacity: settings.history_capacity,
            on_change: None,
        }
    }

    /// Register the mode-change callback (replaces any previous one)
    pub fn on_mode_change(&mut self, callback: ModeChangeCallback) {
        self.on_change = Some(callback);
    }

    /// Add a rule. Among equal priorities, earlier rules win.
    pub fn add_rule(&mut self, rule: ContextualRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ContextualRule] {
        &self.rules
    }

    /// Adaptation history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &ModeChange> {
        self.history.iter()
    }

    /// Capability of every mode that is available and allowed by the user
    pub fn capabilities(&self, context: &InteractionContext) -> Vec<InputMethodCapability> {
        InputMode::ALL
            .iter()
            .copied()
            .filter(|mode| context.is_usable(*mode))
            .map(|mode| assess(mode, context, &self.heuristics, &self.weights))
            .collect()
    }

    /// Matching rules, highest priority first (stable for ties)
    pub fn matching_rules(&self, context: &InteractionContext) -> Vec<&ContextualRule> {
        let mut matches: Vec<&ContextualRule> =
            self.rules.iter().filter(|rule| rule.applies(context)).collect();
        matches.sort_by(|a, b| b.priority.cmp(&a.priority));
        matches
    }

    /// Pick a mode for the context without changing anything
    pub fn recommend(&self, context: &InteractionContext) -> ModeRecommendation {
        if let Some(rule) = self.matching_rules(context).first() {
            if let Some(mode) = rule.first_usable(context) {
                return ModeRecommendation {
                    mode,
                    reason: rule.reason.clone(),
                    confidence: RULE_CONFIDENCE,
                    source: RecommendationSource::Rule {
                        name: rule.name.clone(),
                    },
                };
            }
            debug!(rule = %rule.name, "Top rule has no usable mode, scoring instead");
        }

        let capabilities = self.capabilities(context);

        let preferred = context
            .user_preferences
            .preferred_input_methods
            .iter()
            .find_map(|mode| {
                capabilities
                    .iter()
                    .find(|c| c.mode == *mode && c.score >= self.min_preferred_score)
            });
        if let Some(capability) = preferred {
            return ModeRecommendation {
                mode: capability.mode,
                reason: format!(
                    "Preferred input method {} suits the current context (score {:.2})",
                    capability.mode, capability.score
                ),
                confidence: capability.score,
                source: RecommendationSource::Preference,
            };
        }

        let best = capabilities.iter().fold(None::<&InputMethodCapability>, |best, c| match best {
            Some(b) if b.score >= c.score => Some(b),
            _ => Some(c),
        });
        match best {
            Some(capability) => ModeRecommendation {
                mode: capability.mode,
                reason: format!(
                    "{} scores highest for the current context ({:.2})",
                    capability.mode, capability.score
                ),
                confidence: capability.score,
                source: RecommendationSource::Score,
            },
            None => ModeRecommendation {
                mode: InputMode::Keyboard,
                reason: "No usable input method; falling back to keyboard".to_string(),
                confidence: FALLBACK_CONFIDENCE,
                source: RecommendationSource::Fallback,
            },
        }
    }

    pub fn select_mode(&self, context: &InteractionContext) -> InputMode {
        self.recommend(context).mode
    }

    /// Re-select the mode and switch if it differs from the current one
    pub fn adapt(&mut self, context: &mut InteractionContext) -> Option<ModeChange> {
        let recommendation = self.recommend(context);
        if recommendation.mode == context.current_mode {
            return None;
        }
        if !context.is_available(recommendation.mode) {
            // Only reachable through the keyboard fallback, which is always available.
            return None;
        }
        self.apply_change(context, recommendation.mode, recommendation.reason)
    }

    /// Switch to `mode` on request. Returns false, changing nothing, if the
    /// mode is unavailable or disabled.
    pub fn force_mode(&mut self, context: &mut InteractionContext, mode: InputMode) -> bool {
        if !context.is_usable(mode) {
            return false;
        }
        self.apply_change(context, mode, format!("{} selected manually", mode));
        true
    }

    pub(crate) fn apply_change(
        &mut self,
        context: &mut InteractionContext,
        mode: InputMode,
        reason: String,
    ) -> Option<ModeChange> {
        if context.current_mode == mode {
            return None;
        }

        let change = ModeChange {
            from: context.current_mode,
            to: mode,
            reason,
            timestamp: Utc::now(),
        };
        context.current_mode = mode;
        info!(from = %change.from, to = %change.to, "Input mode changed: {}", change.reason);

        if self.history_capacity > 0 {
            while self.history.len() >= self.history_capacity {
                self.history.pop_front();
            }
            self.history.push_back(change.clone());
        }
        if let Some(callback) = self.on_change.as_mut() {
            callback(mode, &change.reason);
        }
        Some(change)
    }
}
