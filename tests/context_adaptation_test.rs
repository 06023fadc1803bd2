//! Context refresh, adaptation and event delivery

mod common;

use common::{active, afternoon, harness};

use neuralflow::config::Config;
use neuralflow::orchestrator::{EventKind, InteractionEvent};
use neuralflow::{
    DeviceType, EnvironmentalFactors, InputMode, LightingCondition, NoiseLevel, UserPreferences,
    WorkMode,
};

fn voice_first() -> Config {
    Config {
        preferences: UserPreferences {
            preferred_input_methods: vec![InputMode::Voice, InputMode::Keyboard],
            ..UserPreferences::default()
        },
        ..Config::default()
    }
}

#[test]
fn meeting_switches_away_from_voice() {
    let mut h = harness(voice_first(), &[InputMode::Voice, InputMode::Gesture], EnvironmentalFactors::default());
    h.orchestrator.initialize_at(afternoon()).unwrap();
    assert_eq!(h.orchestrator.context().current_mode, InputMode::Voice);
    h.clear_events();

    h.environment.update(|env| env.is_in_meeting = true);
    assert!(h.refresh());

    let context = h.orchestrator.context();
    assert_ne!(context.current_mode, InputMode::Voice);

    let changes = h.events_of(EventKind::ModeChange);
    match &changes[..] {
        [InteractionEvent::ModeChange(change)] => {
            assert_eq!(change.from, InputMode::Voice);
            assert_eq!(change.to, context.current_mode);
            assert!(change.reason.contains("meeting"));
        }
        other => panic!("expected one mode change, got {:?}", other),
    }
    assert_eq!(h.events_of(EventKind::ContextUpdate).len(), 1);
}

#[test]
fn context_update_only_on_significant_change() {
    let mut h = active(&[]);
    h.clear_events();

    assert!(!h.refresh());
    h.environment.update(|env| env.lighting_condition = LightingCondition::Bright);
    assert!(!h.refresh());
    assert!(h.events_of(EventKind::ContextUpdate).is_empty());
    assert_eq!(
        h.orchestrator.context().environmental_factors.lighting_condition,
        LightingCondition::Bright
    );

    h.environment.update(|env| env.noise_level = NoiseLevel::Loud);
    assert!(h.refresh());
    assert_eq!(h.events_of(EventKind::ContextUpdate).len(), 1);

    assert!(h.orchestrator.set_work_mode(WorkMode::Creative).unwrap());
    assert_eq!(h.events_of(EventKind::ContextUpdate).len(), 2);

    h.orchestrator.set_current_task(Some("quarterly plan".into())).unwrap();
    assert_eq!(h.events_of(EventKind::ContextUpdate).len(), 2);
    assert_eq!(
        h.orchestrator.context().work_context.current_task.as_deref(),
        Some("quarterly plan")
    );
}

#[test]
fn current_mode_stays_available_as_capabilities_change() {
    let mut h = harness(voice_first(), &[InputMode::Voice], EnvironmentalFactors::default());
    h.orchestrator.initialize_at(afternoon()).unwrap();
    assert_eq!(h.orchestrator.context().current_mode, InputMode::Voice);

    let ticks: [(&[InputMode], NoiseLevel, DeviceType); 4] = [
        (&[], NoiseLevel::Quiet, DeviceType::Desktop),
        (&[InputMode::Touch, InputMode::Voice], NoiseLevel::VeryLoud, DeviceType::Mobile),
        (&[InputMode::Gesture], NoiseLevel::Moderate, DeviceType::Tablet),
        (&[InputMode::Voice], NoiseLevel::Quiet, DeviceType::Laptop),
    ];
    for (modes, noise, device) in ticks {
        h.capabilities.set(modes);
        h.environment.update(|env| {
            env.noise_level = noise;
            env.device_type = device;
        });
        h.refresh();

        let context = h.orchestrator.context();
        assert!(context.available_modes.contains(&context.current_mode));
    }
}

#[test]
fn forced_mode_validation() {
    let mut h = active(&[InputMode::Touch]);
    h.clear_events();

    assert!(!h.orchestrator.force_mode(InputMode::Gesture).unwrap());
    assert!(h.events.lock().unwrap().is_empty());

    assert!(h.orchestrator.force_mode(InputMode::Touch).unwrap());
    assert_eq!(h.orchestrator.context().current_mode, InputMode::Touch);
    assert_eq!(h.events_of(EventKind::ModeChange).len(), 1);
    assert_eq!(h.events_of(EventKind::ContextUpdate).len(), 1);
    assert_eq!(h.orchestrator.adaptation_history().count(), 1);

    // Already active: accepted, nothing emitted
    assert!(h.orchestrator.force_mode(InputMode::Touch).unwrap());
    assert_eq!(h.events_of(EventKind::ModeChange).len(), 1);
}

#[test]
fn disabling_the_current_mode_moves_off_it() {
    let mut h = harness(voice_first(), &[InputMode::Voice], EnvironmentalFactors::default());
    h.orchestrator.initialize_at(afternoon()).unwrap();

    h.orchestrator
        .update_preferences(neuralflow::PreferencesUpdate {
            disabled_modes: Some([InputMode::Voice].into_iter().collect()),
            ..Default::default()
        })
        .unwrap();
    assert_ne!(h.orchestrator.context().current_mode, InputMode::Voice);
}

#[test]
fn adaptation_can_be_disabled() {
    let mut config = voice_first();
    config.settings.adaptation.enabled = false;
    let mut h = harness(config, &[InputMode::Voice], EnvironmentalFactors::default());
    h.orchestrator.initialize_at(afternoon()).unwrap();

    assert_eq!(h.orchestrator.context().current_mode, InputMode::Keyboard);
    assert!(h.events_of(EventKind::ModeChange).is_empty());
}

#[test]
fn command_history_is_bounded_fifo() {
    let mut h = active(&[]);
    for i in 0..105 {
        h.orchestrator
            .process_text_command(&format!("create task called t{}", i))
            .unwrap()
            .unwrap();
    }

    let history: Vec<_> = h.orchestrator.command_history().collect();
    assert_eq!(history.len(), 100);
    assert_eq!(history[0].intent.entity.as_deref(), Some("t5"));
    assert_eq!(history[99].intent.entity.as_deref(), Some("t104"));
    assert_eq!(h.orchestrator.metrics().commands_processed, 105);
}

#[test]
fn panicking_handler_does_not_block_others() {
    let mut h = harness(Config::default(), &[], EnvironmentalFactors::default());
    h.orchestrator
        .subscribe(EventKind::Command, |_| panic!("subscriber bug"));
    h.orchestrator
        .subscribe(EventKind::Command, |_| anyhow::bail!("subscriber error"));
    h.orchestrator.initialize_at(afternoon()).unwrap();

    h.orchestrator.process_text_command("help").unwrap();
    h.orchestrator.process_text_command("open settings").unwrap();
    assert_eq!(h.events_of(EventKind::Command).len(), 2);
    assert_eq!(h.orchestrator.command_history().count(), 2);
}

#[test]
fn unsubscribed_handlers_stop_receiving() {
    let mut h = active(&[]);
    let hits = std::sync::Arc::new(std::sync::Mutex::new(0));
    let counter = hits.clone();
    let id = h.orchestrator.subscribe(EventKind::Command, move |_| {
        *counter.lock().unwrap() += 1;
        Ok(())
    });

    h.orchestrator.process_text_command("help").unwrap();
    assert!(h.orchestrator.unsubscribe(id));
    h.orchestrator.process_text_command("help").unwrap();
    assert_eq!(*hits.lock().unwrap(), 1);
}
