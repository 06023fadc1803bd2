//! Recognition providers the orchestrator polls
//!
//! Platform speech engines and camera pipelines implement these traits.
//! The queued implementations are fed through a channel handle, which is
//! how the CLI simulates input and how tests drive the orchestrator.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::gesture::HandLandmark;

/// Failure reported by a speech recognizer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("no speech detected")]
    NoSpeech,
    #[error("audio capture failed")]
    AudioCapture,
    #[error("microphone access not allowed")]
    NotAllowed,
    #[error("network error")]
    Network,
    #[error("{0}")]
    Other(String),
}

impl SpeechError {
    /// Errors after which the recognizer is restarted automatically
    pub fn is_transient(&self) -> bool {
        matches!(self, SpeechError::NoSpeech | SpeechError::AudioCapture)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    /// A final transcript
    Transcript {
        text: String,
        confidence: f64,
        language: String,
    },
    Error(SpeechError),
}

/// Continuous speech recognizer
pub trait SpeechProvider: Send {
    /// Begin (or resume) listening
    fn start(&mut self) -> anyhow::Result<()>;

    /// Stop listening and release the microphone
    fn stop(&mut self);

    fn set_language(&mut self, language: &str);

    /// Keep listening across utterances instead of stopping after one
    fn set_continuous(&mut self, continuous: bool);

    /// Events produced since the last poll, oldest first
    fn poll_events(&mut self) -> Vec<SpeechEvent>;
}

/// Hands detected in one video frame, 21 landmarks each
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    pub hands: Vec<Vec<HandLandmark>>,
}

impl HandFrame {
    pub fn single(hand: Vec<HandLandmark>) -> Self {
        Self { hands: vec![hand] }
    }
}

/// Camera plus hand-landmark model
pub trait VideoSource: Send {
    fn start(&mut self) -> anyhow::Result<()>;

    /// Stop capture and release the camera
    fn stop(&mut self);

    /// Frames processed since the last poll, oldest first
    fn poll_frames(&mut self) -> Vec<HandFrame>;
}

/// Observable state of a queued provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderStatus {
    pub running: bool,
    pub starts: u32,
    pub stops: u32,
    pub language: Option<String>,
    pub continuous: Option<bool>,
}

fn lock(status: &Mutex<ProviderStatus>) -> MutexGuard<'_, ProviderStatus> {
    status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Speech provider fed through a [`SpeechHandle`]
///
/// Events are only handed out while the provider is running; anything sent
/// while it is stopped waits in the queue.
pub struct QueuedSpeechProvider {
    rx: Receiver<SpeechEvent>,
    status: Arc<Mutex<ProviderStatus>>,
}

/// Sending side of a [`QueuedSpeechProvider`]
#[derive(Clone)]
pub struct SpeechHandle {
    tx: Sender<SpeechEvent>,
    status: Arc<Mutex<ProviderStatus>>,
}

impl QueuedSpeechProvider {
    pub fn new() -> (Self, SpeechHandle) {
        let (tx, rx) = mpsc::channel();
        let status = Arc::new(Mutex::new(ProviderStatus::default()));
        let handle = SpeechHandle {
            tx,
            status: Arc::clone(&status),
        };
        (Self { rx, status }, handle)
    }
}

impl SpeechProvider for QueuedSpeechProvider {
    fn start(&mut self) -> anyhow::Result<()> {
        let mut status = lock(&self.status);
        status.running = true;
        status.starts += 1;
        Ok(())
    }

    fn stop(&mut self) {
        let mut status = lock(&self.status);
        status.running = false;
        status.stops += 1;
    }

    fn set_language(&mut self, language: &str) {
        lock(&self.status).language = Some(language.to_string());
    }

    fn set_continuous(&mut self, continuous: bool) {
        lock(&self.status).continuous = Some(continuous);
    }

    fn poll_events(&mut self) -> Vec<SpeechEvent> {
        if !lock(&self.status).running {
            return Vec::new();
        }
        self.rx.try_iter().collect()
    }
}

impl SpeechHandle {
    /// Queue an event. Returns false if the provider has been dropped.
    pub fn send(&self, event: SpeechEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Queue a transcript in the provider's current language
    pub fn transcript(&self, text: impl Into<String>, confidence: f64) -> bool {
        let language = lock(&self.status)
            .language
            .clone()
            .unwrap_or_else(|| "en-US".to_string());
        self.send(SpeechEvent::Transcript {
            text: text.into(),
            confidence,
            language,
        })
    }

    pub fn error(&self, error: SpeechError) -> bool {
        self.send(SpeechEvent::Error(error))
    }

    pub fn status(&self) -> ProviderStatus {
        lock(&self.status).clone()
    }
}

/// Video source fed through a [`VideoHandle`]
pub struct QueuedVideoSource {
    rx: Receiver<HandFrame>,
    status: Arc<Mutex<ProviderStatus>>,
}

/// Sending side of a [`QueuedVideoSource`]
#[derive(Clone)]
pub struct VideoHandle {
    tx: Sender<HandFrame>,
    status: Arc<Mutex<ProviderStatus>>,
}

impl QueuedVideoSource {
    pub fn new() -> (Self, VideoHandle) {
        let (tx, rx) = mpsc::channel();
        let status = Arc::new(Mutex::new(ProviderStatus::default()));
        let handle = VideoHandle {
            tx,
            status: Arc::clone(&status),
        };
        (Self { rx, status }, handle)
    }
}

impl VideoSource for QueuedVideoSource {
    fn start(&mut self) -> anyhow::Result<()> {
        let mut status = lock(&self.status);
        status.running = true;
        status.starts += 1;
        Ok(())
    }

    fn stop(&mut self) {
        let mut status = lock(&self.status);
        status.running = false;
        status.stops += 1;
    }

    fn poll_frames(&mut self) -> Vec<HandFrame> {
        if !lock(&self.status).running {
            return Vec::new();
        }
        self.rx.try_iter().collect()
    }
}

impl VideoHandle {
    /// Queue a frame. Returns false if the source has been dropped.
    pub fn send(&self, frame: HandFrame) -> bool {
        self.tx.send(frame).is_ok()
    }

    pub fn send_hand(&self, hand: Vec<HandLandmark>) -> bool {
        self.send(HandFrame::single(hand))
    }

    pub fn status(&self) -> ProviderStatus {
        lock(&self.status).clone()
    }
}
