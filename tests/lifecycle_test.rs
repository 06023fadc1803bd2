//! Orchestrator lifecycle: initialize, inactive operations, shutdown

mod common;

use common::{active, afternoon, harness};

use neuralflow::config::Config;
use neuralflow::environment::{FixedEnvironment, StaticCapabilities};
use neuralflow::orchestrator::{
    ChannelState, EventKind, LifecycleState, MultiModalOrchestrator, QueuedVideoSource,
};
use neuralflow::{EnvironmentalFactors, InputMode, InteractionError, WorkMode};

#[test]
fn operations_before_initialize_are_rejected() {
    let mut h = harness(Config::default(), &[], EnvironmentalFactors::default());
    let o = &mut h.orchestrator;

    assert_eq!(o.state(), LifecycleState::Inactive);
    assert!(matches!(o.process_text_command("help"), Err(InteractionError::NotActive)));
    assert!(matches!(o.poll(), Err(InteractionError::NotActive)));
    assert!(matches!(o.refresh_context_at(afternoon()), Err(InteractionError::NotActive)));
    assert!(matches!(o.force_mode(InputMode::Mouse), Err(InteractionError::NotActive)));
    assert!(matches!(o.set_work_mode(WorkMode::Creative), Err(InteractionError::NotActive)));
    assert!(matches!(o.start_voice_recognition(), Err(InteractionError::NotActive)));
    assert!(h.events.lock().unwrap().is_empty());
}

#[test]
fn initialize_emits_one_context_update() {
    let mut h = active(&[InputMode::Voice]);
    assert_eq!(h.orchestrator.state(), LifecycleState::Active);
    assert_eq!(h.events_of(EventKind::ContextUpdate).len(), 1);

    // A second call is a no-op
    h.orchestrator.initialize_at(afternoon()).unwrap();
    assert_eq!(h.events_of(EventKind::ContextUpdate).len(), 1);

    let context = h.orchestrator.context();
    assert!(context.available_modes.contains(&InputMode::Voice));
    assert!(context.available_modes.contains(&InputMode::Keyboard));
    assert_eq!(context.work_context.time_of_day, "afternoon");
}

#[test]
fn voice_channel_requires_a_provider() {
    let mut orchestrator = MultiModalOrchestrator::new(
        Config::default(),
        Box::new(StaticCapabilities::new([InputMode::Voice])),
        Box::new(FixedEnvironment::default()),
    );
    orchestrator.initialize_at(afternoon()).unwrap();

    assert!(matches!(
        orchestrator.start_voice_recognition(),
        Err(InteractionError::ChannelUnavailable(InputMode::Voice))
    ));
    assert_eq!(orchestrator.voice_state(), ChannelState::Stopped);
}

#[test]
fn shutdown_stops_channels_and_clears_subscribers() {
    let mut h = active(&[InputMode::Voice, InputMode::Gesture]);
    let (video, video_handle) = QueuedVideoSource::new();

    h.orchestrator.start_voice_recognition().unwrap();
    h.orchestrator.start_gesture_recognition(Box::new(video), None).unwrap();
    let extra = h.orchestrator.subscribe(EventKind::Command, |_| Ok(()));

    h.orchestrator.shutdown();

    assert_eq!(h.orchestrator.state(), LifecycleState::ShutDown);
    assert!(!h.speech.status().running);
    assert_eq!(h.speech.status().stops, 1);
    assert!(!video_handle.status().running);
    assert!(!h.orchestrator.unsubscribe(extra));

    assert!(matches!(h.orchestrator.poll(), Err(InteractionError::NotActive)));
    assert!(matches!(
        h.orchestrator.initialize_at(afternoon()),
        Err(InteractionError::AlreadyShutDown)
    ));

    // Idempotent
    h.orchestrator.shutdown();
    assert_eq!(h.speech.status().stops, 1);
}

#[test]
fn text_commands_reach_subscribers_and_history() {
    let mut h = active(&[]);

    let command = h
        .orchestrator
        .process_text_command("search for quarterly report")
        .unwrap()
        .unwrap();
    assert_eq!(command.intent.action, "search");

    let commands = h.events_of(EventKind::Command);
    assert_eq!(commands.len(), 1);
    assert_eq!(h.orchestrator.command_history().count(), 1);
    assert_eq!(h.orchestrator.metrics().commands_processed, 1);

    assert!(h.orchestrator.process_text_command("   ").unwrap().is_none());
    assert_eq!(h.orchestrator.metrics().commands_processed, 1);
}
