//! Landmarks → discrete gesture

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::landmarks::{
    FingerStates, HandLandmark, INDEX_TIP, LANDMARK_COUNT, Point3, THUMB_TIP, WRIST,
    average_visibility, palm_center,
};
use crate::config::GestureSettings;

/// Recognized gesture types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureType {
    /// Index finger extended, others curled
    Point,
    /// Thumb extended, others curled
    ThumbsUp,
    /// Index and middle extended
    PeaceSign,
    /// Thumb and index tips touching, other fingers extended
    OkSign,
    /// Fist
    Grab,
    /// Open hand
    Release,
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
}

impl GestureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureType::Point => "point",
            GestureType::ThumbsUp => "thumbs_up",
            GestureType::PeaceSign => "peace_sign",
            GestureType::OkSign => "ok_sign",
            GestureType::Grab => "grab",
            GestureType::Release => "release",
            GestureType::SwipeLeft => "swipe_left",
            GestureType::SwipeRight => "swipe_right",
            GestureType::SwipeUp => "swipe_up",
            GestureType::SwipeDown => "swipe_down",
        }
    }

    pub fn is_swipe(&self) -> bool {
        matches!(
            self,
            GestureType::SwipeLeft | GestureType::SwipeRight | GestureType::SwipeUp | GestureType::SwipeDown
        )
    }
}

impl std::fmt::Display for GestureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GestureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "point" => Ok(GestureType::Point),
            "thumbs_up" => Ok(GestureType::ThumbsUp),
            "peace_sign" | "peace" => Ok(GestureType::PeaceSign),
            "ok_sign" | "ok" => Ok(GestureType::OkSign),
            "grab" | "fist" => Ok(GestureType::Grab),
            "release" | "open_hand" => Ok(GestureType::Release),
            "swipe_left" => Ok(GestureType::SwipeLeft),
            "swipe_right" => Ok(GestureType::SwipeRight),
            "swipe_up" => Ok(GestureType::SwipeUp),
            "swipe_down" => Ok(GestureType::SwipeDown),
            other => Err(format!("Unknown gesture: {}", other)),
        }
    }
}

/// Result of classifying one hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureRecognition {
    pub gesture: GestureType,
    pub confidence: f64,
    pub coordinates: Point3,
}

/// Classifies hand landmarks into gestures, throttling repeated emissions
pub struct GestureClassifier {
    settings: GestureSettings,
    last_emitted: Option<Instant>,
    swipe_anchor: Option<(Point3, Instant)>,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

impl GestureClassifier {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            last_emitted: None,
            swipe_anchor: None,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    /// Classify a hand observed now
    pub fn classify(&mut self, landmarks: &[HandLandmark]) -> Option<GestureRecognition> {
        self.classify_at(landmarks, Instant::now())
    }

    /// Classify a hand observed at `now`. Returns `None` when nothing matched
    /// or when the previous gesture was emitted less than the throttle
    /// interval ago.
    pub fn classify_at(&mut self, landmarks: &[HandLandmark], now: Instant) -> Option<GestureRecognition> {
        if landmarks.len() < LANDMARK_COUNT {
            return None;
        }

        let gesture = self
            .detect_swipe(landmarks, now)
            .or_else(|| self.detect_pose(landmarks))?;

        if let Some(last) = self.last_emitted {
            if now.saturating_duration_since(last) < Duration::from_millis(self.settings.throttle_ms) {
                debug!(gesture = %gesture, "Gesture throttled");
                return None;
            }
        }
        self.last_emitted = Some(now);
        if gesture.is_swipe() {
            // The next swipe is measured from where this one ended.
            self.swipe_anchor = Some((wrist_position(landmarks), now));
        }

        let confidence = (average_visibility(landmarks) * self.complexity(gesture)).min(1.0);
        Some(GestureRecognition {
            gesture,
            confidence,
            coordinates: palm_center(landmarks),
        })
    }

    /// Forget throttle and swipe state (e.g. when the camera restarts)
    pub fn reset(&mut self) {
        self.last_emitted = None;
        self.swipe_anchor = None;
    }

    fn detect_pose(&self, landmarks: &[HandLandmark]) -> Option<GestureType> {
        let fingers = FingerStates::from_landmarks(landmarks);

        let pinch = landmarks[THUMB_TIP].distance_2d(&landmarks[INDEX_TIP]);
        if pinch < self.settings.ok_sign_threshold && fingers.middle && fingers.ring && fingers.pinky {
            return Some(GestureType::OkSign);
        }

        match fingers.as_array() {
            [true, true, true, true, true] => Some(GestureType::Release),
            [false, false, false, false, false] => Some(GestureType::Grab),
            [false, true, false, false, false] => Some(GestureType::Point),
            [false, true, true, false, false] => Some(GestureType::PeaceSign),
            [true, false, false, false, false] => Some(GestureType::ThumbsUp),
            _ => None,
        }
    }

    /// Swipe relative to the anchor. The anchor only moves when the window
    /// expires or a swipe is emitted, so a throttled swipe is not lost.
    fn detect_swipe(&mut self, landmarks: &[HandLandmark], now: Instant) -> Option<GestureType> {
        let position = wrist_position(landmarks);
        let window = Duration::from_millis(self.settings.swipe_window_ms);

        let Some((anchor, since)) = self.swipe_anchor else {
            self.swipe_anchor = Some((position, now));
            return None;
        };
        if now.saturating_duration_since(since) > window {
            self.swipe_anchor = Some((position, now));
            return None;
        }

        let dx = position.x - anchor.x;
        let dy = position.y - anchor.y;
        let distance = self.settings.swipe_distance;
        if dx.abs() >= dy.abs() && dx.abs() >= distance {
            Some(if dx < 0.0 { GestureType::SwipeLeft } else { GestureType::SwipeRight })
        } else if dy.abs() > dx.abs() && dy.abs() >= distance {
            Some(if dy < 0.0 { GestureType::SwipeUp } else { GestureType::SwipeDown })
        } else {
            None
        }
    }

    fn complexity(&self, gesture: GestureType) -> f64 {
        let c = &self.settings.complexity;
        match gesture {
            GestureType::Point => c.point,
            GestureType::ThumbsUp => c.thumbs_up,
            GestureType::PeaceSign => c.peace_sign,
            GestureType::OkSign => c.ok_sign,
            GestureType::Grab => c.grab,
            GestureType::Release => c.release,
            GestureType::SwipeLeft | GestureType::SwipeRight | GestureType::SwipeUp | GestureType::SwipeDown => {
                c.swipe
            }
        }
    }
}

fn wrist_position(landmarks: &[HandLandmark]) -> Point3 {
    let wrist = landmarks[WRIST];
    Point3 {
        x: wrist.x,
        y: wrist.y,
        z: wrist.z,
    }
}
