//! Demonstration of the FingerPoint gesture pipeline.
//!
//! This example shows how to:
//! 1. Build landmark frames for a few synthetic hand poses
//! 2. Feed them through a replay feed at camera cadence
//! 3. Classify them with a gesture controller
//! 4. Map the resulting events to viewport pixels
//!
//! Run with: cargo run --example replay_demo

use fingerpoint::{
    landmarks::{RecordedFrame, ReplayConfig, ReplayFeed},
    stats::create_shared_log,
    GestureController, GestureKind, GestureThresholds, Point3D, RecordingSink, Viewport,
    GESTURE_GUIDE,
};

const FRAME_MS: u64 = 33;

/// A hand at `palm_y` with the thumb `gap` away from the index tip.
fn pose(palm_y: f64, gap: f64, two_fingers: bool) -> Vec<Point3D> {
    let reach = if two_fingers { 0.4 } else { 0.1 };
    let mut points = vec![Point3D::new(0.5, palm_y, 0.0); 21];
    points[5] = Point3D::new(0.45, palm_y - 0.2, 0.0);
    points[9] = Point3D::new(0.5, palm_y - 0.2, 0.0);
    points[8] = Point3D::new(0.45, palm_y - reach, 0.0);
    points[12] = Point3D::new(0.5, palm_y - reach, 0.0);
    points[4] = Point3D::new(0.45, palm_y - reach, gap);
    points
}

fn script() -> Vec<RecordedFrame> {
    let mut frames = Vec::new();
    let mut t = 0;
    let mut push = |hands: Vec<Vec<Point3D>>| {
        frames.push(RecordedFrame::new(t, hands));
        t += FRAME_MS;
    };

    // Point, then a quick pinch (click)
    for _ in 0..5 {
        push(vec![pose(0.9, 0.2, false)]);
    }
    for _ in 0..4 {
        push(vec![pose(0.9, 0.01, false)]);
    }
    push(vec![pose(0.9, 0.2, false)]);

    // Hold a pinch for two seconds (long-press)
    for _ in 0..60 {
        push(vec![pose(0.9, 0.01, false)]);
    }
    push(vec![pose(0.9, 0.2, false)]);

    // Two fingers up, drag the palm upwards (scroll)
    for step in 0..10 {
        push(vec![pose(0.9 - step as f64 * 0.02, 0.2, true)]);
    }

    // Hand leaves the view
    push(Vec::new());
    frames
}

fn main() {
    println!("FingerPoint - Replay Demo");
    println!("=========================");
    println!("{GESTURE_GUIDE}");

    let viewport = Viewport::new(1280.0, 720.0);
    let log = create_shared_log();
    let mut controller =
        GestureController::new(GestureThresholds::default(), RecordingSink::new())
            .with_log(log.clone());

    let mut feed = ReplayFeed::new(
        script(),
        ReplayConfig {
            realtime: true,
            speed: 4.0,
            ..ReplayConfig::default()
        },
    );

    if let Err(e) = feed.start() {
        eprintln!("Error starting feed: {e}");
        return;
    }

    for (frame, now) in feed.receiver().iter() {
        controller.handle_frame(&frame, now);
        for event in controller.sink_mut().take_events() {
            if event.kind() == GestureKind::Move {
                continue;
            }
            let action = viewport.map(&event);
            println!("[{:>5}ms] {:<28} {action}", now.as_millis(), event.to_string());
        }
    }
    feed.stop();

    println!();
    println!("{}", log.summary());
}
