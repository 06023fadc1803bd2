//! Visual feedback for tracked hands

use super::landmarks::{HAND_CONNECTIONS, HandLandmark};

/// Drawing surface for the landmark overlay
pub trait OverlaySink: Send {
    fn clear(&mut self);
    fn draw_connections(&mut self, landmarks: &[HandLandmark], connections: &[(usize, usize)]);
    fn draw_landmarks(&mut self, landmarks: &[HandLandmark]);
}

/// Redraw the overlay for one frame
pub fn render_hands(sink: &mut dyn OverlaySink, hands: &[Vec<HandLandmark>]) {
    sink.clear();
    for hand in hands {
        sink.draw_connections(hand, &HAND_CONNECTIONS);
        sink.draw_landmarks(hand);
    }
}
