//! Gesture channel: frames to commands, throttling, overlay, stop

mod common;

use std::time::{Duration, Instant};

use common::{RecordingOverlay, active};

use neuralflow::gesture::{GestureType, synthetic};
use neuralflow::orchestrator::{ChannelState, EventKind, HandFrame, QueuedVideoSource};
use neuralflow::{CommandSource, InputMode, PreferencesUpdate};

#[test]
fn thumbs_up_becomes_approve_command() {
    let mut h = active(&[InputMode::Gesture]);
    let (video, frames) = QueuedVideoSource::new();
    h.orchestrator.start_gesture_recognition(Box::new(video), None).unwrap();
    assert_eq!(h.orchestrator.gesture_state(), ChannelState::Running);

    frames.send_hand(synthetic::gesture_pose(GestureType::ThumbsUp, 0.8).unwrap());
    assert_eq!(h.orchestrator.poll().unwrap(), 1);

    let command = h.orchestrator.command_history().last().unwrap();
    assert_eq!(command.source, CommandSource::Gesture);
    assert_eq!(command.intent.action, "approve");
    // visibility 0.8 x complexity 0.95 x mapping weight 0.9
    assert!((command.confidence - 0.684).abs() < 1e-9);
    assert_eq!(command.intent.parameter_str("gesture"), Some("thumbs_up"));
    assert_eq!(command.raw_data.as_ref().unwrap()["gesture"], "thumbs_up");
    assert_eq!(h.events_of(EventKind::Command).len(), 1);
}

#[test]
fn repeated_frames_are_throttled() {
    let mut h = active(&[InputMode::Gesture]);
    let (video, frames) = QueuedVideoSource::new();
    h.orchestrator.start_gesture_recognition(Box::new(video), None).unwrap();
    let t0 = Instant::now();

    let pose = synthetic::gesture_pose(GestureType::Point, 0.9).unwrap();
    frames.send_hand(pose.clone());
    frames.send_hand(pose.clone());
    assert_eq!(h.orchestrator.poll_at(t0).unwrap(), 1);

    frames.send_hand(pose);
    assert_eq!(h.orchestrator.poll_at(t0 + Duration::from_millis(150)).unwrap(), 1);
    assert_eq!(h.orchestrator.command_history().count(), 2);
}

#[test]
fn frames_without_hands_or_poses_produce_nothing() {
    let mut h = active(&[InputMode::Gesture]);
    let (video, frames) = QueuedVideoSource::new();
    h.orchestrator.start_gesture_recognition(Box::new(video), None).unwrap();

    frames.send(HandFrame::default());
    frames.send_hand(synthetic::hand_pose([true, true, false, false, true], 0.9, 0.0));
    assert_eq!(h.orchestrator.poll().unwrap(), 0);
    assert!(h.events_of(EventKind::Command).is_empty());
}

#[test]
fn disabled_gestures_are_ignored() {
    let mut h = active(&[InputMode::Gesture]);
    h.orchestrator
        .update_preferences(PreferencesUpdate {
            gesture_enabled: Some(false),
            ..PreferencesUpdate::default()
        })
        .unwrap();
    let (video, frames) = QueuedVideoSource::new();
    h.orchestrator.start_gesture_recognition(Box::new(video), None).unwrap();

    frames.send_hand(synthetic::gesture_pose(GestureType::Grab, 0.9).unwrap());
    assert_eq!(h.orchestrator.poll().unwrap(), 0);
}

#[test]
fn overlay_is_drawn_per_frame_and_cleared_on_stop() {
    let mut h = active(&[InputMode::Gesture]);
    let overlay = RecordingOverlay::default();
    let calls = overlay.0.clone();
    let (video, frames) = QueuedVideoSource::new();
    h.orchestrator
        .start_gesture_recognition(Box::new(video), Some(Box::new(overlay)))
        .unwrap();

    frames.send_hand(synthetic::gesture_pose(GestureType::PeaceSign, 0.9).unwrap());
    h.orchestrator.poll().unwrap();
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["clear", "connections:21", "landmarks:21"]
    );

    h.orchestrator.stop_gesture_recognition().unwrap();
    assert_eq!(calls.lock().unwrap().last().map(String::as_str), Some("clear"));
}

#[test]
fn stop_releases_the_camera() {
    let mut h = active(&[InputMode::Gesture]);
    let (video, frames) = QueuedVideoSource::new();
    h.orchestrator.start_gesture_recognition(Box::new(video), None).unwrap();
    h.orchestrator.stop_gesture_recognition().unwrap();

    let status = frames.status();
    assert!(!status.running);
    assert_eq!(status.stops, 1);
    assert_eq!(h.orchestrator.gesture_state(), ChannelState::Stopped);

    // The source was dropped with the channel
    assert!(!frames.send_hand(synthetic::gesture_pose(GestureType::Grab, 0.9).unwrap()));
    assert_eq!(h.orchestrator.poll().unwrap(), 0);
}
