//! Hand landmark geometry (21-point hand topology)

use serde::{Deserialize, Serialize};

/// Number of landmarks per hand
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Bone connections for overlay drawing
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

/// One tracked point. `x`/`y` are normalized image coordinates (y grows
/// downward), `visibility` is the tracker's confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandLandmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub visibility: f64,
}

impl HandLandmark {
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }

    /// Planar distance, ignoring depth
    pub fn distance_2d(&self, other: &HandLandmark) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A point in normalized image space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Extended/flexed state of the five fingers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Derive finger states from a full landmark set (caller checks length).
    ///
    /// A finger is extended when its tip is above its PIP joint. The thumb
    /// bends sideways, so it is extended when its tip lies horizontally
    /// farther from the index knuckle than its IP joint does.
    pub fn from_landmarks(landmarks: &[HandLandmark]) -> Self {
        let above = |tip: usize, pip: usize| landmarks[tip].y < landmarks[pip].y;
        let anchor = landmarks[INDEX_MCP].x;
        let thumb =
            (landmarks[THUMB_TIP].x - anchor).abs() > (landmarks[THUMB_IP].x - anchor).abs();

        Self {
            thumb,
            index: above(INDEX_TIP, INDEX_PIP),
            middle: above(MIDDLE_TIP, MIDDLE_PIP),
            ring: above(RING_TIP, RING_PIP),
            pinky: above(PINKY_TIP, PINKY_PIP),
        }
    }

    pub fn as_array(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }
}

/// Mean of the wrist and the four knuckles
pub fn palm_center(landmarks: &[HandLandmark]) -> Point3 {
    let points = [WRIST, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];
    let n = points.len() as f64;
    let sum = points.iter().fold((0.0, 0.0, 0.0), |acc, &i| {
        (acc.0 + landmarks[i].x, acc.1 + landmarks[i].y, acc.2 + landmarks[i].z)
    });
    Point3 {
        x: sum.0 / n,
        y: sum.1 / n,
        z: sum.2 / n,
    }
}

pub fn average_visibility(landmarks: &[HandLandmark]) -> f64 {
    if landmarks.is_empty() {
        return 0.0;
    }
    landmarks.iter().map(|l| l.visibility).sum::<f64>() / landmarks.len() as f64
}
