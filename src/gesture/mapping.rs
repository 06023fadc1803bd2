//! Gesture → command intent lookup table

use serde_json::Value;

use super::classifier::{GestureRecognition, GestureType};
use crate::domain::CommandIntent;

/// (gesture, action, weight). The intent confidence is the gesture
/// confidence times the weight.
pub const GESTURE_INTENTS: &[(GestureType, &str, f64)] = &[
    (GestureType::ThumbsUp, "approve", 0.9),
    (GestureType::SwipeLeft, "navigate_back", 0.85),
    (GestureType::SwipeRight, "navigate_forward", 0.85),
    (GestureType::SwipeUp, "scroll_up", 0.8),
    (GestureType::SwipeDown, "scroll_down", 0.8),
    (GestureType::Point, "select", 0.85),
    (GestureType::PeaceSign, "toggle_view", 0.75),
    (GestureType::OkSign, "confirm", 0.85),
    (GestureType::Grab, "grab_item", 0.8),
    (GestureType::Release, "release_item", 0.8),
];

/// Look up the action and weight for a gesture
pub fn gesture_action(gesture: GestureType) -> Option<(&'static str, f64)> {
    GESTURE_INTENTS
        .iter()
        .find(|(g, _, _)| *g == gesture)
        .map(|(_, action, weight)| (*action, *weight))
}

/// Turn a recognized gesture into a command intent
pub fn gesture_intent(recognition: &GestureRecognition) -> Option<CommandIntent> {
    let (action, weight) = gesture_action(recognition.gesture)?;
    let confidence = (recognition.confidence * weight).min(1.0);

    Some(
        CommandIntent::new(action, confidence)
            .with_parameter("gesture", Value::from(recognition.gesture.as_str()))
            .with_parameter("x", Value::from(recognition.coordinates.x))
            .with_parameter("y", Value::from(recognition.coordinates.y)),
    )
}
