//! Integration tests for the recording -> feed -> controller pipeline.

use crossbeam_channel::bounded;
use fingerpoint::landmarks::{
    read_recording, write_recording, RecordedFrame, ReplayConfig, ReplayFeed,
};
use fingerpoint::stats::create_shared_log;
use fingerpoint::{
    ChannelSink, GestureController, GestureEvent, GestureThresholds, Point3D, RecordingSink,
};
use std::path::PathBuf;

fn test_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fingerpoint-{name}-{}", uuid::Uuid::new_v4()))
}

/// 21 points with the index tip at (0.4, 0.6) and the thumb `gap` away.
fn hand_points(gap: f64) -> Vec<Point3D> {
    let mut points = vec![Point3D::new(0.5, 0.9, 0.0); 21];
    points[5] = Point3D::new(0.45, 0.7, 0.0);
    points[9] = Point3D::new(0.5, 0.7, 0.0);
    points[8] = Point3D::new(0.4, 0.6, 0.0);
    points[12] = Point3D::new(0.5, 0.85, 0.0);
    points[4] = Point3D::new(0.4 + gap, 0.6, 0.0);
    points
}

fn click_recording() -> Vec<RecordedFrame> {
    vec![
        RecordedFrame::new(0, vec![hand_points(0.2)]),
        RecordedFrame::new(33, vec![hand_points(0.01)]),
        RecordedFrame::new(66, vec![hand_points(0.01)]),
        RecordedFrame::new(99, vec![hand_points(0.2)]),
        RecordedFrame::new(132, vec![hand_points(0.2)[..10].to_vec()]),
        RecordedFrame::new(165, Vec::new()),
    ]
}

#[test]
fn test_recording_round_trip_through_disk() {
    let dir = test_dir("recording");
    let path = dir.join("session.jsonl");

    write_recording(&path, &click_recording()).expect("Failed to write recording");
    let frames = read_recording(&path).expect("Failed to read recording");

    let expected = click_recording();
    assert_eq!(frames.len(), expected.len());
    for (read, written) in frames.iter().zip(&expected) {
        assert_eq!(read.t, written.t);
        assert_eq!(read.hands.len(), written.hands.len());
        assert_eq!(read.to_frame().has_hand(), written.to_frame().has_hand());
    }
    let tip = frames[1].hands[0][8];
    assert!((tip.x - 0.4).abs() < 1e-12 && (tip.y - 0.6).abs() < 1e-12);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_replay_pipeline_emits_click_and_hand_loss() {
    let mut feed = ReplayFeed::new(click_recording(), ReplayConfig::default());
    let log = create_shared_log();
    let mut controller =
        GestureController::new(GestureThresholds::default(), RecordingSink::new())
            .with_log(log.clone());

    feed.start().expect("Failed to start feed");
    for (frame, now) in feed.receiver().iter() {
        controller.handle_frame(&frame, now);
    }
    feed.stop();

    let events = controller.into_sink().take_events();
    let kinds: Vec<&str> = events.iter().map(|e| e.kind().as_str()).collect();
    assert_eq!(
        kinds,
        vec!["move", "move", "move", "move", "click", "no-hand", "no-hand"]
    );

    match events[4] {
        GestureEvent::Click { x, y } => {
            assert!((x - 0.6).abs() < 1e-9);
            assert!((y - 0.6).abs() < 1e-9);
        }
        other => panic!("expected click, got {other:?}"),
    }

    let stats = log.stats();
    assert_eq!(stats.frames, 6);
    assert_eq!(stats.hand_frames, 4);
    assert_eq!(stats.no_hand_frames, 2);
    assert_eq!(stats.clicks, 1);
}

#[test]
fn test_channel_sink_delivers_in_order() {
    let (tx, rx) = bounded(64);
    let mut controller =
        GestureController::new(GestureThresholds::default(), ChannelSink::new(tx));

    for frame in click_recording() {
        controller.handle_frame(&frame.to_frame(), frame.timestamp());
    }
    drop(controller);

    let received: Vec<GestureEvent> = rx.iter().collect();
    assert_eq!(received.len(), 7);
    assert!(matches!(received[4], GestureEvent::Click { .. }));
    assert_eq!(received[6], GestureEvent::NoHand);
}
