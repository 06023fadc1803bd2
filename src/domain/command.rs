use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::input::InputMode;
use super::intent::CommandIntent;

/// Where a command came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandSource {
    Voice,
    Gesture,
    Keyboard,
    Mouse,
    Touch,
}

impl CommandSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandSource::Voice => "voice",
            CommandSource::Gesture => "gesture",
            CommandSource::Keyboard => "keyboard",
            CommandSource::Mouse => "mouse",
            CommandSource::Touch => "touch",
        }
    }

    /// The input mode this source belongs to
    pub fn input_mode(&self) -> InputMode {
        match self {
            CommandSource::Voice => InputMode::Voice,
            CommandSource::Gesture => InputMode::Gesture,
            CommandSource::Keyboard => InputMode::Keyboard,
            CommandSource::Mouse => InputMode::Mouse,
            CommandSource::Touch => InputMode::Touch,
        }
    }
}

impl std::fmt::Display for CommandSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recognized command, ready for the UI to execute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiModalCommand {
    pub id: Uuid,
    pub source: CommandSource,
    pub intent: CommandIntent,
    pub timestamp: DateTime<Utc>,
    pub confidence: f64,
    pub raw_data: Option<serde_json::Value>,
}

impl MultiModalCommand {
    pub fn new(source: CommandSource, intent: CommandIntent) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            confidence: intent.confidence(),
            intent,
            timestamp: Utc::now(),
            raw_data: None,
        }
    }

    pub fn with_raw_data(mut self, raw: serde_json::Value) -> Self {
        self.raw_data = Some(raw);
        self
    }
}
