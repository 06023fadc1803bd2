use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured representation of what the user wants done
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandIntent {
    pub action: String,
    pub entity: Option<String>,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    confidence: f64,
}

impl CommandIntent {
    /// Create an intent; confidence is clamped into [0, 1]
    pub fn new(action: impl Into<String>, confidence: f64) -> Self {
        Self {
            action: action.into(),
            entity: None,
            parameters: Map::new(),
            confidence: clamp_confidence(confidence),
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Add to the confidence, staying inside [0, 1]
    pub fn boost(&mut self, delta: f64) {
        self.confidence = clamp_confidence(self.confidence + delta);
    }

    /// Combine with a secondary recognizer score (e.g. the speech engine's)
    pub fn scale(&mut self, factor: f64) {
        self.confidence = clamp_confidence(self.confidence * factor);
    }

    pub fn parameter_str(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(Value::as_str)
    }
}

pub(crate) fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(CommandIntent::new("help", 1.4).confidence(), 1.0);
        assert_eq!(CommandIntent::new("help", -0.2).confidence(), 0.0);
        assert_eq!(CommandIntent::new("help", f64::NAN).confidence(), 0.0);

        let mut intent = CommandIntent::new("create_task", 0.95);
        intent.boost(0.1);
        assert_eq!(intent.confidence(), 1.0);
        intent.scale(0.5);
        assert!((intent.confidence() - 0.5).abs() < 1e-9);
    }
}
