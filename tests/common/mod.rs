//! Shared harness for orchestrator integration tests
#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};

use neuralflow::config::Config;
use neuralflow::environment::{CapabilityProvider, EnvironmentSample, EnvironmentSensor};
use neuralflow::gesture::{HandLandmark, OverlaySink};
use neuralflow::orchestrator::{
    EventKind, InteractionEvent, MultiModalOrchestrator, QueuedSpeechProvider, SpeechHandle,
};
use neuralflow::{EnvironmentalFactors, InputMode, InteractionContext};

/// Environment the test can change between refreshes
#[derive(Clone, Default)]
pub struct SharedEnvironment(Arc<Mutex<EnvironmentalFactors>>);

impl SharedEnvironment {
    pub fn set(&self, factors: EnvironmentalFactors) {
        *self.0.lock().unwrap() = factors;
    }

    pub fn update(&self, f: impl FnOnce(&mut EnvironmentalFactors)) {
        f(&mut self.0.lock().unwrap());
    }
}

impl EnvironmentSensor for SharedEnvironment {
    fn sample(&mut self, _context: &InteractionContext, _now: NaiveDateTime) -> EnvironmentSample {
        EnvironmentSample {
            factors: *self.0.lock().unwrap(),
            time_of_day: "afternoon".to_string(),
        }
    }
}

/// Capabilities the test can change between refreshes
#[derive(Clone, Default)]
pub struct SharedCapabilities(Arc<Mutex<BTreeSet<InputMode>>>);

impl SharedCapabilities {
    pub fn new(modes: &[InputMode]) -> Self {
        let shared = Self::default();
        shared.set(modes);
        shared
    }

    pub fn set(&self, modes: &[InputMode]) {
        *self.0.lock().unwrap() = modes.iter().copied().collect();
    }
}

impl CapabilityProvider for SharedCapabilities {
    fn available_modes(&self) -> BTreeSet<InputMode> {
        self.0.lock().unwrap().clone()
    }
}

/// Records overlay calls
#[derive(Clone, Default)]
pub struct RecordingOverlay(pub Arc<Mutex<Vec<String>>>);

impl OverlaySink for RecordingOverlay {
    fn clear(&mut self) {
        self.0.lock().unwrap().push("clear".to_string());
    }

    fn draw_connections(&mut self, _landmarks: &[HandLandmark], connections: &[(usize, usize)]) {
        self.0.lock().unwrap().push(format!("connections:{}", connections.len()));
    }

    fn draw_landmarks(&mut self, landmarks: &[HandLandmark]) {
        self.0.lock().unwrap().push(format!("landmarks:{}", landmarks.len()));
    }
}

pub struct Harness {
    pub orchestrator: MultiModalOrchestrator,
    pub speech: SpeechHandle,
    pub environment: SharedEnvironment,
    pub capabilities: SharedCapabilities,
    pub events: Arc<Mutex<Vec<InteractionEvent>>>,
}

/// 2024-03-12 14:00, a Tuesday afternoon
pub fn afternoon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 12)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap()
}

/// An orchestrator with a queued speech provider, not yet initialized.
/// Every event is recorded.
pub fn harness(config: Config, modes: &[InputMode], factors: EnvironmentalFactors) -> Harness {
    let environment = SharedEnvironment::default();
    environment.set(factors);
    let capabilities = SharedCapabilities::new(modes);
    let (provider, speech) = QueuedSpeechProvider::new();

    let mut orchestrator = MultiModalOrchestrator::new(
        config,
        Box::new(capabilities.clone()),
        Box::new(environment.clone()),
    )
    .with_speech(Box::new(provider));

    let events = Arc::new(Mutex::new(Vec::new()));
    for kind in EventKind::ALL {
        let sink = Arc::clone(&events);
        orchestrator.subscribe(kind, move |event| {
            sink.lock().unwrap().push(event.clone());
            Ok(())
        });
    }

    Harness {
        orchestrator,
        speech,
        environment,
        capabilities,
        events,
    }
}

/// Initialized orchestrator with default config and quiet desktop surroundings
pub fn active(modes: &[InputMode]) -> Harness {
    let mut h = harness(Config::default(), modes, EnvironmentalFactors::default());
    h.orchestrator.initialize_at(afternoon()).unwrap();
    h
}

impl Harness {
    pub fn events_of(&self, kind: EventKind) -> Vec<InteractionEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.kind() == kind)
            .cloned()
            .collect()
    }

    pub fn clear_events(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn refresh(&mut self) -> bool {
        self.orchestrator.refresh_context_at(afternoon()).unwrap()
    }
}
