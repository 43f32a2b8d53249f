//! Replay of recorded provider output as a live frame feed.
//!
//! The feed stands in for the hand-tracking provider's callback cadence: a
//! worker thread pushes validated frames, in recorded order, through a
//! bounded channel that the frame loop drains one frame at a time.

use crate::landmarks::recording::RecordedFrame;
use crate::landmarks::types::{LandmarkFrame, Timestamp};
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const SEND_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A frame as delivered to the frame loop.
pub type FeedFrame = (LandmarkFrame, Timestamp);

/// Replay pacing options.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Sleep the recorded gap between frames
    pub realtime: bool,
    /// Playback speed multiplier for realtime mode
    pub speed: f64,
    /// Channel capacity between the feed and the frame loop
    pub capacity: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            realtime: false,
            speed: 1.0,
            capacity: 256,
        }
    }
}

/// Errors that can occur while running a feed.
#[derive(Debug)]
pub enum FeedError {
    AlreadyRunning,
    /// A feed delivers its frames once; build a new feed to replay again.
    Finished,
    ThreadSpawn(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::AlreadyRunning => write!(f, "Feed is already running"),
            FeedError::Finished => write!(f, "Feed has already been started"),
            FeedError::ThreadSpawn(e) => write!(f, "Could not start feed thread: {e}"),
        }
    }
}

impl std::error::Error for FeedError {}

/// Feeds recorded frames through a channel from a worker thread.
pub struct ReplayFeed {
    frames: Arc<Vec<RecordedFrame>>,
    config: ReplayConfig,
    sender: Option<Sender<FeedFrame>>,
    receiver: Receiver<FeedFrame>,
    running: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    worker: Option<JoinHandle<()>>,
}

impl ReplayFeed {
    /// Create a new feed over the given frames.
    pub fn new(frames: Vec<RecordedFrame>, config: ReplayConfig) -> Self {
        let (sender, receiver) = bounded(config.capacity.max(1));
        Self {
            frames: Arc::new(frames),
            config,
            sender: Some(sender),
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            dropped: Arc::new(AtomicU64::new(0)),
            worker: None,
        }
    }

    /// Start delivering frames.
    ///
    /// The channel disconnects once every frame has been sent, so the frame
    /// loop can drain until `recv` fails. A feed can only be started once.
    pub fn start(&mut self) -> Result<(), FeedError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(FeedError::AlreadyRunning);
        }
        let sender = self.sender.take().ok_or(FeedError::Finished)?;

        self.running.store(true, Ordering::SeqCst);
        let frames = Arc::clone(&self.frames);
        let config = self.config.clone();
        let running = Arc::clone(&self.running);
        let dropped = Arc::clone(&self.dropped);

        let handle = thread::Builder::new()
            .name("fingerpoint-replay".to_string())
            .spawn(move || run_feed(&frames, &config, &sender, &running, &dropped))
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                FeedError::ThreadSpawn(e.to_string())
            })?;

        tracing::debug!(
            frames = self.frames.len(),
            realtime = self.config.realtime,
            "Replay feed started"
        );
        self.worker = Some(handle);
        Ok(())
    }

    /// Stop delivering frames. Frames already queued stay in the channel.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::warn!("Replay feed thread panicked");
            }
        }
    }

    /// Check if the feed is still delivering frames.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for delivered frames.
    pub fn receiver(&self) -> &Receiver<FeedFrame> {
        &self.receiver
    }

    /// Try to receive a frame without blocking.
    pub fn try_recv(&self) -> Option<FeedFrame> {
        self.receiver.try_recv().ok()
    }

    /// Frames dropped because the frame loop fell behind in realtime mode.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Drop for ReplayFeed {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

fn run_feed(
    frames: &[RecordedFrame],
    config: &ReplayConfig,
    sender: &Sender<FeedFrame>,
    running: &AtomicBool,
    dropped: &AtomicU64,
) {
    let mut previous: Option<u64> = None;

    for recorded in frames {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        if config.realtime {
            if let Some(prev) = previous {
                let gap_ms =
                    recorded.t.saturating_sub(prev) as f64 / config.speed.max(f64::EPSILON);
                let gap =
                    Duration::try_from_secs_f64(gap_ms / 1000.0).unwrap_or(Duration::MAX);
                if !sleep_while_running(gap, running) {
                    break;
                }
            }
            previous = Some(recorded.t);
        }

        let item = (recorded.to_frame(), recorded.timestamp());

        if config.realtime {
            // A live provider never waits on a slow consumer.
            match sender.try_send(item) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    dropped.fetch_add(1, Ordering::Relaxed);
                }
                Err(TrySendError::Disconnected(_)) => break,
            }
        } else if !send_while_running(sender, item, running) {
            break;
        }
    }

    running.store(false, Ordering::SeqCst);
}

/// Sleep in short slices so a stop request is seen within one poll interval.
/// Returns false if the feed was stopped before the gap elapsed.
fn sleep_while_running(gap: Duration, running: &AtomicBool) -> bool {
    let deadline = Instant::now().checked_add(gap);
    loop {
        if !running.load(Ordering::SeqCst) {
            return false;
        }
        let remaining = match deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => SEND_POLL_INTERVAL,
        };
        if remaining.is_zero() {
            return true;
        }
        thread::sleep(remaining.min(SEND_POLL_INTERVAL));
    }
}

/// Blocking send that gives up once the feed is stopped or the loop hangs up.
fn send_while_running(
    sender: &Sender<FeedFrame>,
    mut item: FeedFrame,
    running: &AtomicBool,
) -> bool {
    loop {
        match sender.send_timeout(item, SEND_POLL_INTERVAL) {
            Ok(()) => return true,
            Err(SendTimeoutError::Timeout(returned)) => {
                if !running.load(Ordering::SeqCst) {
                    return false;
                }
                item = returned;
            }
            Err(SendTimeoutError::Disconnected(_)) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_hand_frames(n: u64) -> Vec<RecordedFrame> {
        (0..n).map(|i| RecordedFrame::new(i * 33, Vec::new())).collect()
    }

    #[test]
    fn test_feed_delivers_in_order() {
        let mut feed = ReplayFeed::new(no_hand_frames(10), ReplayConfig::default());
        feed.start().unwrap();

        let received: Vec<FeedFrame> = feed.receiver().iter().collect();
        assert_eq!(received.len(), 10);
        for (i, (frame, t)) in received.iter().enumerate() {
            assert_eq!(*frame, LandmarkFrame::NoHand);
            assert_eq!(t.as_millis(), i as u64 * 33);
        }

        feed.stop();
        assert!(!feed.is_running());
        assert_eq!(feed.dropped_frames(), 0);
    }

    fn long_gap_feed() -> ReplayFeed {
        let frames = vec![
            RecordedFrame::new(0, Vec::new()),
            RecordedFrame::new(5000, Vec::new()),
        ];
        ReplayFeed::new(
            frames,
            ReplayConfig {
                realtime: true,
                ..ReplayConfig::default()
            },
        )
    }

    #[test]
    fn test_feed_cannot_start_twice() {
        let mut feed = long_gap_feed();
        feed.start().unwrap();
        assert!(matches!(feed.start(), Err(FeedError::AlreadyRunning)));
        feed.stop();
    }

    #[test]
    fn test_finished_feed_cannot_restart() {
        let mut feed = ReplayFeed::new(no_hand_frames(3), ReplayConfig::default());
        feed.start().unwrap();
        assert_eq!(feed.receiver().iter().count(), 3);
        feed.stop();

        assert!(!feed.is_running());
        assert!(matches!(feed.start(), Err(FeedError::Finished)));
    }

    #[test]
    fn test_stop_interrupts_realtime_gap() {
        let mut feed = long_gap_feed();
        feed.start().unwrap();
        let (frame, t) = feed
            .receiver()
            .recv_timeout(Duration::from_secs(1))
            .unwrap();
        assert_eq!(frame, LandmarkFrame::NoHand);
        assert_eq!(t.as_millis(), 0);

        let started = Instant::now();
        feed.stop();
        assert!(started.elapsed() < Duration::from_millis(500));
        assert!(!feed.is_running());
        assert!(feed.try_recv().is_none());
    }

    #[test]
    fn test_tiny_speed_does_not_overflow_sleep() {
        let frames = vec![
            RecordedFrame::new(0, Vec::new()),
            RecordedFrame::new(33, Vec::new()),
        ];
        let mut feed = ReplayFeed::new(
            frames,
            ReplayConfig {
                realtime: true,
                speed: 1e-300,
                ..ReplayConfig::default()
            },
        );
        feed.start().unwrap();
        assert!(feed
            .receiver()
            .recv_timeout(Duration::from_secs(1))
            .is_ok());

        let started = Instant::now();
        feed.stop();
        assert!(started.elapsed() < Duration::from_millis(500));
    }
}
