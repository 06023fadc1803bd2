//! Contextual input-mode adaptation
//!
//! Selection order: the highest-priority matching [`ContextualRule`] acts as
//! a hard override; otherwise every usable mode is scored and the user's
//! preferred mode is taken if it scores well enough, else the best one.

mod capability;
mod rules;
mod selector;

#[cfg(test)]
mod tests;

pub use capability::{InputMethodCapability, assess};
pub use rules::{ContextualRule, RuleCondition, default_rules};
pub use selector::{
    FALLBACK_CONFIDENCE, InputModeSelector, ModeChange, ModeChangeCallback, ModeRecommendation,
    RULE_CONFIDENCE, RecommendationSource,
};
