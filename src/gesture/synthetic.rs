//! Synthetic hand poses
//!
//! Landmark sets that classify as a given static gesture. Used to drive
//! the gesture channel without a camera (CLI simulation, tests).

use super::classifier::GestureType;
use super::landmarks::{
    HandLandmark, INDEX_TIP, LANDMARK_COUNT, THUMB_IP, THUMB_TIP, WRIST,
};

const FINGER_BASE: [usize; 4] = [5, 9, 13, 17];
const FINGER_X: [f64; 4] = [0.45, 0.5, 0.55, 0.6];

/// A right hand, palm towards the camera, with the given fingers extended
/// (thumb, index, middle, ring, pinky), shifted horizontally by `offset_x`
pub fn hand_pose(extended: [bool; 5], visibility: f64, offset_x: f64) -> Vec<HandLandmark> {
    let mut points = vec![HandLandmark::new(0.5, 0.9, 0.0, visibility); LANDMARK_COUNT];

    points[WRIST] = HandLandmark::new(0.5, 0.9, 0.0, visibility);
    points[1] = HandLandmark::new(0.42, 0.82, 0.0, visibility);
    points[2] = HandLandmark::new(0.38, 0.76, 0.0, visibility);
    points[THUMB_IP] = HandLandmark::new(0.35, 0.72, 0.0, visibility);
    points[THUMB_TIP] = if extended[0] {
        HandLandmark::new(0.25, 0.68, 0.0, visibility)
    } else {
        HandLandmark::new(0.42, 0.7, 0.0, visibility)
    };

    for (finger, (&base, &x)) in FINGER_BASE.iter().zip(FINGER_X.iter()).enumerate() {
        let tip_y = if extended[finger + 1] { 0.3 } else { 0.6 };
        points[base] = HandLandmark::new(x, 0.62, 0.0, visibility);
        points[base + 1] = HandLandmark::new(x, 0.5, 0.0, visibility);
        points[base + 2] = HandLandmark::new(x, (0.5 + tip_y) / 2.0, 0.0, visibility);
        points[base + 3] = HandLandmark::new(x, tip_y, 0.0, visibility);
    }

    for point in &mut points {
        point.x += offset_x;
    }
    points
}

/// Landmarks for a static gesture; `None` for swipes, which need motion
pub fn gesture_pose(gesture: GestureType, visibility: f64) -> Option<Vec<HandLandmark>> {
    let extended = match gesture {
        GestureType::Point => [false, true, false, false, false],
        GestureType::ThumbsUp => [true, false, false, false, false],
        GestureType::PeaceSign => [false, true, true, false, false],
        GestureType::Grab => [false; 5],
        GestureType::Release => [true; 5],
        GestureType::OkSign => {
            let mut points = hand_pose([false, false, true, true, true], visibility, 0.0);
            let index_tip = points[INDEX_TIP];
            points[THUMB_TIP] = HandLandmark::new(index_tip.x - 0.01, index_tip.y + 0.01, 0.0, visibility);
            return Some(points);
        }
        _ => return None,
    };
    Some(hand_pose(extended, visibility, 0.0))
}
