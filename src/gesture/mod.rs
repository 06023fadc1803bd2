//! Hand gesture recognition
//!
//! - `landmarks`: 21-point hand geometry and finger states
//! - `classifier`: decision table, swipe detection and throttling
//! - `mapping`: gesture → command intent table
//! - `overlay`: optional landmark drawing for visual feedback
//! - `synthetic`: canned poses for camera-less operation

mod classifier;
pub mod landmarks;
mod mapping;
mod overlay;
pub mod synthetic;


pub use classifier::{GestureClassifier, GestureRecognition, GestureType};
pub use landmarks::{FingerStates, HAND_CONNECTIONS, HandLandmark, LANDMARK_COUNT, Point3};
pub use mapping::{GESTURE_INTENTS, gesture_action, gesture_intent};
pub use overlay::{OverlaySink, render_hands};
