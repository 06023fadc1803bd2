//! The multi-modal orchestrator state machine

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use super::events::{EventBus, EventKind, InteractionEvent, SubscriptionId};
use super::metrics::{MetricsTracker, PerformanceMetrics};
use super::providers::{HandFrame, SpeechError, SpeechEvent, SpeechProvider, VideoSource};
use crate::adaptation::{InputMethodCapability, InputModeSelector, ModeChange, ModeRecommendation};
use crate::config::{Config, VoiceSettings};
use crate::domain::{
    CommandSource, InputMode, InteractionContext, MultiModalCommand, PreferencesUpdate, WorkMode,
};
use crate::environment::{CapabilityProvider, EnvironmentSensor};
use crate::error::InteractionError;
use crate::gesture::{GestureClassifier, HandLandmark, OverlaySink, gesture_intent, render_hands};
use crate::intent::{IntentClassifier, IntentExtractor, IntentRule};

/// Orchestrator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Inactive,
    Active,
    /// Terminal
    ShutDown,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Inactive => write!(f, "inactive"),
            LifecycleState::Active => write!(f, "active"),
            LifecycleState::ShutDown => write!(f, "shut down"),
        }
    }
}

/// State of a recognition channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelState {
    #[default]
    Stopped,
    Running,
    /// Waiting to restart after a transient error
    Restarting,
}

impl std::fmt::Display for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelState::Stopped => write!(f, "stopped"),
            ChannelState::Running => write!(f, "running"),
            ChannelState::Restarting => write!(f, "restarting"),
        }
    }
}

struct GestureChannel {
    source: Box<dyn VideoSource>,
    overlay: Option<Box<dyn OverlaySink>>,
}

/// Coordinates recognition channels, context adaptation and event delivery
///
/// A single-threaded `&mut self` state machine: providers are polled by
/// [`poll`](Self::poll) and the context is refreshed by
/// [`refresh_context`](Self::refresh_context), both driven by the host's
/// event loop.
pub struct MultiModalOrchestrator {
    state: LifecycleState,
    adaptation_enabled: bool,
    voice_settings: VoiceSettings,
    context: InteractionContext,
    selector: InputModeSelector,
    extractor: IntentExtractor,
    classifier: GestureClassifier,
    capabilities: Box<dyn CapabilityProvider>,
    environment: Box<dyn EnvironmentSensor>,
    speech: Option<Box<dyn SpeechProvider>>,
    voice_state: ChannelState,
    voice_restart_at: Option<Instant>,
    gesture: Option<GestureChannel>,
    history: VecDeque<MultiModalCommand>,
    history_capacity: usize,
    metrics: MetricsTracker,
    bus: EventBus,
}

impl MultiModalOrchestrator {
    pub fn new(
        config: Config,
        capabilities: Box<dyn CapabilityProvider>,
        environment: Box<dyn EnvironmentSensor>,
    ) -> Self {
        let settings = config.settings;
        let context = InteractionContext::default().with_preferences(config.preferences);

        Self {
            state: LifecycleState::Inactive,
            adaptation_enabled: settings.adaptation.enabled,
            voice_settings: settings.voice,
            context,
            selector: InputModeSelector::new(&settings.adaptation, settings.heuristics),
            extractor: IntentExtractor::new(settings.orchestrator.intent_history_capacity),
            classifier: GestureClassifier::new(settings.gesture),
            capabilities,
            environment,
            speech: None,
            voice_state: ChannelState::Stopped,
            voice_restart_at: None,
            gesture: None,
            history: VecDeque::new(),
            history_capacity: settings.orchestrator.command_history_capacity.max(1),
            metrics: MetricsTracker::new(&settings.orchestrator),
            bus: EventBus::new(),
        }
    }

    /// Attach the speech recognizer used by the voice channel
    pub fn with_speech(mut self, mut speech: Box<dyn SpeechProvider>) -> Self {
        speech.set_language(&self.context.user_preferences.voice_language);
        self.speech = Some(speech);
        self
    }

    /// Consult a statistical classifier when no intent rule matches
    pub fn with_intent_classifier(mut self, classifier: Box<dyn IntentClassifier>) -> Self {
        self.extractor.set_classifier(classifier);
        self
    }

    /// Append an intent rule after the built-in ones
    pub fn add_intent_rule(&mut self, rule: IntentRule) {
        self.extractor.add_rule(rule);
    }

    /// Detect capabilities, sample the environment and run the first
    /// adaptation. Always emits a `ContextUpdate`.
    pub fn initialize(&mut self) -> Result<(), InteractionError> {
        self.initialize_at(Local::now().naive_local())
    }

    pub fn initialize_at(&mut self, now: NaiveDateTime) -> Result<(), InteractionError> {
        match self.state {
            LifecycleState::ShutDown => return Err(InteractionError::AlreadyShutDown),
            LifecycleState::Active => {
                debug!("Orchestrator already initialized");
                return Ok(());
            }
            LifecycleState::Inactive => {}
        }

        self.state = LifecycleState::Active;
        let next = self.sampled_context(now);
        self.commit(next, true);
        info!(
            mode = %self.context.current_mode,
            available = self.context.available_modes.len(),
            "Orchestrator initialized"
        );
        Ok(())
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn context(&self) -> &InteractionContext {
        &self.context
    }

    /// Recognized commands, oldest first
    pub fn command_history(&self) -> impl Iterator<Item = &MultiModalCommand> {
        self.history.iter()
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        self.metrics.snapshot()
    }

    pub fn voice_state(&self) -> ChannelState {
        self.voice_state
    }

    pub fn gesture_state(&self) -> ChannelState {
        if self.gesture.is_some() {
            ChannelState::Running
        } else {
            ChannelState::Stopped
        }
    }

    /// What the selector would pick for the current context
    pub fn recommendation(&self) -> ModeRecommendation {
        self.selector.recommend(&self.context)
    }

    pub fn capabilities(&self) -> Vec<InputMethodCapability> {
        self.selector.capabilities(&self.context)
    }

    pub fn adaptation_history(&self) -> impl Iterator<Item = &ModeChange> {
        self.selector.history()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&InteractionEvent) -> anyhow::Result<()> + Send + 'static,
    {
        self.bus.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // -- voice channel --

    pub fn start_voice_recognition(&mut self) -> Result<(), InteractionError> {
        self.ensure_active()?;
        let speech = self
            .speech
            .as_mut()
            .ok_or(InteractionError::ChannelUnavailable(InputMode::Voice))?;

        if self.voice_state == ChannelState::Running {
            return Ok(());
        }
        speech.set_language(&self.context.user_preferences.voice_language);
        speech.set_continuous(self.voice_settings.continuous);
        if let Err(e) = speech.start() {
            let message = format!("{:#}", e);
            self.report_error(InputMode::Voice, message.clone());
            return Err(InteractionError::recognition(InputMode::Voice, message));
        }

        self.voice_state = ChannelState::Running;
        self.voice_restart_at = None;
        info!(language = %self.context.user_preferences.voice_language, "Voice recognition started");
        Ok(())
    }

    pub fn stop_voice_recognition(&mut self) -> Result<(), InteractionError> {
        self.ensure_active()?;
        self.halt_voice();
        Ok(())
    }

    // -- gesture channel --

    /// Take ownership of a video source (and optional overlay) and start it.
    /// Replaces any running gesture channel.
    pub fn start_gesture_recognition(
        &mut self,
        mut source: Box<dyn VideoSource>,
        overlay: Option<Box<dyn OverlaySink>>,
    ) -> Result<(), InteractionError> {
        self.ensure_active()?;
        self.halt_gesture();

        if let Err(e) = source.start() {
            let message = format!("{:#}", e);
            self.report_error(InputMode::Gesture, message.clone());
            return Err(InteractionError::recognition(InputMode::Gesture, message));
        }

        self.classifier.reset();
        self.gesture = Some(GestureChannel { source, overlay });
        info!("Gesture recognition started");
        Ok(())
    }

    /// Stop the camera and drop the video source
    pub fn stop_gesture_recognition(&mut self) -> Result<(), InteractionError> {
        self.ensure_active()?;
        self.halt_gesture();
        Ok(())
    }

    // -- input processing --

    /// Drain pending speech events and video frames.
    /// Returns the number of commands produced.
    pub fn poll(&mut self) -> Result<usize, InteractionError> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Result<usize, InteractionError> {
        self.ensure_active()?;
        let mut produced = 0;

        if self.voice_restart_at.is_some_and(|at| now >= at) {
            self.restart_voice();
        }

        if self.voice_state == ChannelState::Running {
            let events = self
                .speech
                .as_mut()
                .map(|speech| speech.poll_events())
                .unwrap_or_default();

            for event in events {
                // A stopped or restarting channel delivers nothing more.
                if self.voice_state != ChannelState::Running {
                    break;
                }
                match event {
                    SpeechEvent::Transcript {
                        text,
                        confidence,
                        language,
                    } => {
                        if self.handle_transcript(&text, confidence, &language).is_some() {
                            produced += 1;
                        }
                    }
                    SpeechEvent::Error(error) => self.handle_speech_error(error, now),
                }
            }
        }

        let frames = self
            .gesture
            .as_mut()
            .map(|channel| channel.source.poll_frames())
            .unwrap_or_default();
        for frame in frames {
            produced += self.handle_frame(&frame, now);
        }

        Ok(produced)
    }

    /// Interpret a typed command
    pub fn process_text_command(&mut self, text: &str) -> Result<Option<MultiModalCommand>, InteractionError> {
        self.ensure_active()?;
        let started = Instant::now();

        let Some(intent) = self.extractor.extract(text, Some(&self.context)) else {
            debug!(text, "No intent for typed command");
            return Ok(None);
        };

        let command = MultiModalCommand::new(CommandSource::Keyboard, intent).with_raw_data(json!({ "text": text }));
        self.record_command(command.clone(), started);
        Ok(Some(command))
    }

    fn handle_transcript(&mut self, text: &str, confidence: f64, language: &str) -> Option<MultiModalCommand> {
        let started = Instant::now();
        let Some(mut intent) = self.extractor.extract(text, Some(&self.context)) else {
            debug!(text, "No intent for transcript");
            return None;
        };
        intent.scale(confidence);

        let command = MultiModalCommand::new(CommandSource::Voice, intent).with_raw_data(json!({
            "transcript": text,
            "confidence": confidence,
            "language": language,
        }));
        self.record_command(command.clone(), started);
        Some(command)
    }

    fn handle_speech_error(&mut self, error: SpeechError, now: Instant) {
        self.report_error(InputMode::Voice, error.to_string());

        if error.is_transient() && self.voice_settings.auto_restart {
            let delay = Duration::from_millis(self.voice_settings.restart_delay_ms);
            self.voice_state = ChannelState::Restarting;
            self.voice_restart_at = Some(now + delay);
            debug!(?delay, "Voice recognition will restart");
        } else {
            self.halt_voice();
        }
    }

    fn restart_voice(&mut self) {
        self.voice_restart_at = None;
        let Some(speech) = self.speech.as_mut() else {
            self.voice_state = ChannelState::Stopped;
            return;
        };

        match speech.start() {
            Ok(()) => {
                self.voice_state = ChannelState::Running;
                debug!("Voice recognition restarted");
            }
            Err(e) => {
                self.voice_state = ChannelState::Stopped;
                self.report_error(InputMode::Voice, format!("Failed to restart: {:#}", e));
            }
        }
    }

    fn handle_frame(&mut self, frame: &HandFrame, now: Instant) -> usize {
        if let Some(overlay) = self.gesture.as_mut().and_then(|channel| channel.overlay.as_mut()) {
            render_hands(overlay.as_mut(), &frame.hands);
        }
        if !self.context.user_preferences.allows(InputMode::Gesture) {
            return 0;
        }

        let mut produced = 0;
        for hand in &frame.hands {
            if self.handle_hand(hand, now).is_some() {
                produced += 1;
            }
        }
        produced
    }

    fn handle_hand(&mut self, hand: &[HandLandmark], now: Instant) -> Option<MultiModalCommand> {
        let started = Instant::now();
        let recognition = self.classifier.classify_at(hand, now)?;
        let Some(intent) = gesture_intent(&recognition) else {
            debug!(gesture = %recognition.gesture, "Gesture has no mapped action");
            return None;
        };

        let raw = serde_json::to_value(recognition).unwrap_or_default();
        let command = MultiModalCommand::new(CommandSource::Gesture, intent).with_raw_data(raw);
        self.record_command(command.clone(), started);
        Some(command)
    }

    fn record_command(&mut self, command: MultiModalCommand, started: Instant) {
        let elapsed = started.elapsed();
        info!(
            source = %command.source,
            action = %command.intent.action,
            confidence = command.confidence,
            "Command recognized"
        );

        while self.history.len() >= self.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(command.clone());
        self.bus.emit(&InteractionEvent::Command(command));
        self.metrics.record_command(elapsed);
    }

    fn report_error(&mut self, source: InputMode, message: String) {
        warn!(source = %source, "Recognition error: {}", message);
        self.metrics.record_error();
        self.bus.emit(&InteractionEvent::Error { source, message });
    }

    // -- context --

    /// Resample the environment and adapt the input mode.
    /// Returns true if the context changed significantly.
    pub fn refresh_context(&mut self) -> Result<bool, InteractionError> {
        self.refresh_context_at(Local::now().naive_local())
    }

    pub fn refresh_context_at(&mut self, now: NaiveDateTime) -> Result<bool, InteractionError> {
        self.ensure_active()?;
        let next = self.sampled_context(now);
        Ok(self.commit(next, false))
    }

    /// Merge partial preferences and forward the voice language
    pub fn update_preferences(&mut self, update: PreferencesUpdate) -> Result<bool, InteractionError> {
        self.ensure_active()?;
        let mut next = self.context.clone();
        next.user_preferences.apply(update);

        let language = &next.user_preferences.voice_language;
        if *language != self.context.user_preferences.voice_language {
            if let Some(speech) = self.speech.as_mut() {
                speech.set_language(language);
            }
            info!(language = %language, "Voice language changed");
        }
        Ok(self.commit(next, false))
    }

    pub fn set_work_mode(&mut self, work_mode: WorkMode) -> Result<bool, InteractionError> {
        self.ensure_active()?;
        let mut next = self.context.clone();
        next.work_context.work_mode = work_mode;
        Ok(self.commit(next, false))
    }

    pub fn set_current_task(&mut self, task: Option<String>) -> Result<(), InteractionError> {
        self.ensure_active()?;
        let mut next = self.context.clone();
        next.work_context.current_task = task;
        self.commit(next, false);
        Ok(())
    }

    pub fn set_current_project(&mut self, project: Option<String>) -> Result<(), InteractionError> {
        self.ensure_active()?;
        let mut next = self.context.clone();
        next.work_context.current_project = project;
        self.commit(next, false);
        Ok(())
    }

    /// Replace the list of running applications. Meeting detection picks
    /// it up on the next refresh.
    pub fn set_active_applications(&mut self, applications: Vec<String>) -> Result<(), InteractionError> {
        self.ensure_active()?;
        let mut next = self.context.clone();
        next.work_context.active_applications = applications;
        self.commit(next, false);
        Ok(())
    }

    /// Switch to `mode` on request. Returns false, emitting nothing, if the
    /// mode is unavailable or disabled. A later refresh may adapt away again.
    pub fn force_mode(&mut self, mode: InputMode) -> Result<bool, InteractionError> {
        self.ensure_active()?;
        if !self.context.is_usable(mode) {
            debug!(mode = %mode, "Rejected forced mode");
            return Ok(false);
        }

        let mut next = self.context.clone();
        let change = self
            .selector
            .apply_change(&mut next, mode, format!("{} selected manually", mode));
        self.context = next;

        if let Some(change) = change {
            self.bus.emit(&InteractionEvent::ModeChange(change));
            self.bus.emit(&InteractionEvent::ContextUpdate(self.context.clone()));
        }
        Ok(true)
    }

    fn sampled_context(&mut self, now: NaiveDateTime) -> InteractionContext {
        let sample = self.environment.sample(&self.context, now);
        let mut next = self.context.clone();
        next.environmental_factors = sample.factors;
        next.work_context.time_of_day = sample.time_of_day;
        next.set_available_modes(self.capabilities.available_modes());
        next
    }

    /// Adapt `next`, swap it in and emit events. Returns true on a
    /// significant change.
    fn commit(&mut self, mut next: InteractionContext, force_update: bool) -> bool {
        let change = if self.adaptation_enabled {
            self.selector.adapt(&mut next)
        } else {
            None
        };

        let significant = is_significant_change(&self.context, &next);
        self.context = next;

        if let Some(change) = change {
            self.bus.emit(&InteractionEvent::ModeChange(change));
        }
        if significant || force_update {
            self.bus.emit(&InteractionEvent::ContextUpdate(self.context.clone()));
        }
        significant
    }

    // -- shutdown --

    /// Stop both channels, release sensors and drop all subscribers
    pub fn shutdown(&mut self) {
        if self.state == LifecycleState::ShutDown {
            return;
        }
        self.halt_voice();
        self.halt_gesture();
        self.speech = None;
        self.environment.shutdown();
        self.bus.clear();
        self.state = LifecycleState::ShutDown;
        info!(
            commands = self.metrics.snapshot().commands_processed,
            "Orchestrator shut down"
        );
    }

    fn ensure_active(&self) -> Result<(), InteractionError> {
        match self.state {
            LifecycleState::Active => Ok(()),
            LifecycleState::Inactive | LifecycleState::ShutDown => Err(InteractionError::NotActive),
        }
    }

    fn halt_voice(&mut self) {
        self.voice_restart_at = None;
        if self.voice_state != ChannelState::Stopped {
            if let Some(speech) = self.speech.as_mut() {
                speech.stop();
            }
            self.voice_state = ChannelState::Stopped;
            info!("Voice recognition stopped");
        }
    }

    fn halt_gesture(&mut self) {
        if let Some(mut channel) = self.gesture.take() {
            channel.source.stop();
            if let Some(overlay) = channel.overlay.as_mut() {
                overlay.clear();
            }
            info!("Gesture recognition stopped");
        }
    }
}

impl Drop for MultiModalOrchestrator {
    fn drop(&mut self) {
        self.halt_voice();
        self.halt_gesture();
    }
}

/// Mode, work mode, meeting state or noise level changed
fn is_significant_change(previous: &InteractionContext, next: &InteractionContext) -> bool {
    let (a, b) = (&previous.environmental_factors, &next.environmental_factors);
    previous.current_mode != next.current_mode
        || previous.work_context.work_mode != next.work_context.work_mode
        || a.is_in_meeting != b.is_in_meeting
        || a.noise_level != b.noise_level
}
