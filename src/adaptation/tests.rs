//! Unit tests for input-mode adaptation.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use super::*;
use crate::config::{AdaptationSettings, ModeHeuristics, ScoringWeights};
use crate::domain::{
    AccessibilityRequirement, DeviceType, EnvironmentalFactors, InputMode, InteractionContext,
    LightingCondition, NoiseLevel, UserPreferences, WorkMode,
};

fn context_with(modes: &[InputMode]) -> InteractionContext {
    InteractionContext::new(modes.iter().copied().collect())
}

fn prefer(context: &mut InteractionContext, modes: &[InputMode]) {
    context.user_preferences.preferred_input_methods = modes.to_vec();
}

#[test]
fn meeting_never_selects_voice() {
    let mut context = context_with(&[InputMode::Voice, InputMode::Gesture]);
    prefer(&mut context, &[InputMode::Voice]);
    context.environmental_factors.is_in_meeting = true;

    let recommendation = InputModeSelector::default().recommend(&context);
    assert_ne!(recommendation.mode, InputMode::Voice);
    assert!(recommendation.reason.contains("meeting"));
    assert!(recommendation.reason.contains("disruption"));
}

#[test]
fn voice_only_accessibility_overrides_meeting() {
    let mut context = context_with(&[InputMode::Voice]);
    context.environmental_factors.is_in_meeting = true;
    context
        .user_preferences
        .accessibility_needs
        .insert(AccessibilityRequirement::VoiceOnly);

    let recommendation = InputModeSelector::default().recommend(&context);
    assert_eq!(recommendation.mode, InputMode::Voice);
    assert_eq!(
        recommendation.source,
        RecommendationSource::Rule {
            name: "accessibility_voice_only".to_string()
        }
    );
}

#[test]
fn higher_priority_wins_regardless_of_declaration_order() {
    let mut selector = InputModeSelector::default();
    selector.add_rule(ContextualRule::new("late_low", 1, vec![InputMode::Mouse], "low", |_| true));
    selector.add_rule(ContextualRule::new("late_high", 20, vec![InputMode::Touch], "high", |_| true));

    let context = context_with(&[InputMode::Touch]);
    assert_eq!(selector.select_mode(&context), InputMode::Touch);
}

#[test]
fn equal_priority_first_registered_wins() {
    let mut selector = InputModeSelector::default();
    selector.add_rule(ContextualRule::new("first", 30, vec![InputMode::Mouse], "first", |_| true));
    selector.add_rule(ContextualRule::new("second", 30, vec![InputMode::Keyboard], "second", |_| true));

    let recommendation = selector.recommend(&context_with(&[]));
    assert_eq!(recommendation.mode, InputMode::Mouse);
    assert_eq!(recommendation.reason, "first");
}

#[test]
fn rule_without_usable_mode_falls_through_to_scoring() {
    let mut selector = InputModeSelector::default();
    selector.add_rule(ContextualRule::new(
        "eye_only",
        50,
        vec![InputMode::EyeTracking],
        "eyes",
        |_| true,
    ));

    let recommendation = selector.recommend(&context_with(&[]));
    assert_ne!(recommendation.mode, InputMode::EyeTracking);
    assert!(matches!(
        recommendation.source,
        RecommendationSource::Preference | RecommendationSource::Score
    ));
}

#[test]
fn very_loud_mobile_prefers_touch_or_keyboard_over_voice() {
    let mut context = context_with(&[InputMode::Touch, InputMode::Gesture, InputMode::Voice]);
    prefer(&mut context, &[InputMode::Voice]);
    context.environmental_factors = EnvironmentalFactors {
        noise_level: NoiseLevel::VeryLoud,
        device_type: DeviceType::Mobile,
        ..EnvironmentalFactors::default()
    };

    let selector = InputModeSelector::default();
    let mode = selector.select_mode(&context);
    assert!(matches!(mode, InputMode::Touch | InputMode::Keyboard));

    let scores = selector.capabilities(&context);
    let score = |m: InputMode| scores.iter().find(|c| c.mode == m).unwrap().score;
    assert!(score(InputMode::Touch) > score(InputMode::Voice));
    assert!(score(InputMode::Keyboard) > score(InputMode::Voice));
}

#[test]
fn qualifying_preferred_mode_is_chosen() {
    let mut context = context_with(&[InputMode::Voice]).with_work_mode(WorkMode::Research);
    prefer(&mut context, &[InputMode::Voice, InputMode::Keyboard]);

    let recommendation = InputModeSelector::default().recommend(&context);
    assert_eq!(recommendation.mode, InputMode::Voice);
    assert_eq!(recommendation.source, RecommendationSource::Preference);
}

#[test]
fn weak_preferred_mode_loses_to_best_score() {
    let mut context = context_with(&[InputMode::Touch]).with_work_mode(WorkMode::Research);
    prefer(&mut context, &[InputMode::Touch]);

    let recommendation = InputModeSelector::default().recommend(&context);
    assert_eq!(recommendation.mode, InputMode::Keyboard);
    assert_eq!(recommendation.source, RecommendationSource::Score);
}

#[test]
fn all_modes_disabled_falls_back_to_keyboard() {
    let mut context = context_with(&[InputMode::Voice]);
    context.user_preferences.disabled_modes = InputMode::ALL.into_iter().collect();

    let recommendation = InputModeSelector::default().recommend(&context);
    assert_eq!(recommendation.mode, InputMode::Keyboard);
    assert_eq!(recommendation.source, RecommendationSource::Fallback);
}

#[test]
fn disabled_and_gesture_off_modes_are_not_scored() {
    let mut context = context_with(&[InputMode::Voice, InputMode::Gesture]);
    context.user_preferences = UserPreferences {
        gesture_enabled: false,
        disabled_modes: BTreeSet::from([InputMode::Voice]),
        ..UserPreferences::default()
    };

    let modes: Vec<InputMode> = InputModeSelector::default()
        .capabilities(&context)
        .into_iter()
        .map(|c| c.mode)
        .collect();
    assert_eq!(modes, vec![InputMode::Keyboard, InputMode::Mouse]);
}

#[test]
fn adapt_is_sticky_and_idempotent() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);

    let mut selector = InputModeSelector::default();
    selector.on_mode_change(Box::new(move |mode, reason| {
        sink.lock().unwrap().push((mode, reason.to_string()));
    }));

    let mut context = context_with(&[InputMode::Touch]);
    context.environmental_factors.device_type = DeviceType::Tablet;

    let change = selector.adapt(&mut context).unwrap();
    assert_eq!(change.from, InputMode::Keyboard);
    assert_eq!(change.to, InputMode::Touch);
    assert_eq!(context.current_mode, InputMode::Touch);

    assert!(selector.adapt(&mut context).is_none());
    assert_eq!(selector.select_mode(&context), InputMode::Touch);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, InputMode::Touch);
    assert_eq!(selector.history().count(), 1);
}

#[test]
fn current_mode_stays_available_across_ticks() {
    let mut selector = InputModeSelector::default();
    let mut context = context_with(&[InputMode::Voice, InputMode::Touch, InputMode::Gesture]);

    let environments = [
        (NoiseLevel::Quiet, LightingCondition::Bright, DeviceType::Desktop, false),
        (NoiseLevel::VeryLoud, LightingCondition::Dark, DeviceType::Mobile, false),
        (NoiseLevel::Moderate, LightingCondition::Dim, DeviceType::Tablet, true),
        (NoiseLevel::Loud, LightingCondition::Normal, DeviceType::Laptop, false),
    ];
    for (noise, light, device, meeting) in environments {
        context.environmental_factors = EnvironmentalFactors {
            noise_level: noise,
            lighting_condition: light,
            device_type: device,
            is_in_meeting: meeting,
            ..EnvironmentalFactors::default()
        };
        selector.adapt(&mut context);
        assert!(context.available_modes.contains(&context.current_mode));
    }
}

#[test]
fn force_mode_rejects_unavailable_and_disabled() {
    let mut selector = InputModeSelector::default();
    let mut context = context_with(&[InputMode::Voice]);
    context.user_preferences.disabled_modes.insert(InputMode::Voice);

    assert!(!selector.force_mode(&mut context, InputMode::Gesture));
    assert!(!selector.force_mode(&mut context, InputMode::Voice));
    assert_eq!(context.current_mode, InputMode::Keyboard);
    assert_eq!(selector.history().count(), 0);

    assert!(selector.force_mode(&mut context, InputMode::Mouse));
    assert_eq!(context.current_mode, InputMode::Mouse);
}

#[test]
fn adaptation_history_is_bounded() {
    let settings = AdaptationSettings {
        history_capacity: 3,
        ..AdaptationSettings::default()
    };
    let mut selector = InputModeSelector::new(&settings, ModeHeuristics::default());
    let mut context = context_with(&[]);

    for _ in 0..4 {
        selector.force_mode(&mut context, InputMode::Mouse);
        selector.force_mode(&mut context, InputMode::Keyboard);
    }
    let history: Vec<&ModeChange> = selector.history().collect();
    assert_eq!(history.len(), 3);
    assert_eq!(history.last().unwrap().to, InputMode::Keyboard);
}

#[test]
fn heuristic_reliability_values() {
    let heuristics = ModeHeuristics::default();
    let weights = ScoringWeights::default();

    let mut context = context_with(&[InputMode::Voice, InputMode::Gesture]);
    context.environmental_factors.is_in_meeting = true;
    context.environmental_factors.lighting_condition = LightingCondition::Dim;

    let voice = assess(InputMode::Voice, &context, &heuristics, &weights);
    assert!((voice.reliability - 0.1).abs() < 1e-9);
    assert_eq!(voice.environmental_suitability, 0.0);

    let gesture = assess(InputMode::Gesture, &context, &heuristics, &weights);
    assert!((gesture.reliability - 0.4).abs() < 1e-9);

    context.environmental_factors.is_in_meeting = false;
    for noise in [NoiseLevel::Loud, NoiseLevel::VeryLoud] {
        context.environmental_factors.noise_level = noise;
        let voice = assess(InputMode::Voice, &context, &heuristics, &weights);
        assert!((voice.reliability - 0.3).abs() < 1e-9, "{noise}: {}", voice.reliability);
    }
}

#[test]
fn score_is_weighted_sum() {
    let context = context_with(&[]);
    let c = assess(
        InputMode::Keyboard,
        &context,
        &ModeHeuristics::default(),
        &ScoringWeights::default(),
    );
    let expected = 0.30 * c.reliability
        + 0.25 * c.efficiency
        + 0.25 * c.accessibility
        + 0.20 * c.environmental_suitability;
    assert!((c.score - expected).abs() < 1e-9);
    assert!((0.0..=1.0).contains(&c.score));
}
