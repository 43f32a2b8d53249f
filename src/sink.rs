//! Event sinks that receive classified gestures.
//!
//! A sink is called synchronously, once per event, in emission order,
//! from inside the frame that produced the event. Sinks must not block.

use crate::core::events::GestureEvent;
use crossbeam_channel::{Sender, TrySendError};

/// Receiver of classified gesture events.
pub trait EventSink {
    fn on_gesture(&mut self, event: &GestureEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GestureEvent),
{
    fn on_gesture(&mut self, event: &GestureEvent) {
        self(event)
    }
}

/// Forwards events to another thread without ever blocking the frame loop.
pub struct ChannelSink {
    sender: Sender<GestureEvent>,
    dropped: u64,
}

impl ChannelSink {
    pub fn new(sender: Sender<GestureEvent>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Events lost because the channel was full or closed.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl EventSink for ChannelSink {
    fn on_gesture(&mut self, event: &GestureEvent) {
        match self.sender.try_send(*event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                tracing::warn!(kind = event.kind().as_str(), "Event channel full, dropping event");
            }
            Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
                tracing::debug!("Event channel closed, dropping event");
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<GestureEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GestureEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<GestureEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn on_gesture(&mut self, event: &GestureEvent) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        {
            let mut sink = |_: &GestureEvent| count += 1;
            sink.on_gesture(&GestureEvent::NoHand);
            sink.on_gesture(&GestureEvent::NoHand);
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_channel_sink_drops_when_full() {
        let (tx, rx) = bounded(1);
        let mut sink = ChannelSink::new(tx);

        sink.on_gesture(&GestureEvent::Scroll { dy: 0.1 });
        sink.on_gesture(&GestureEvent::NoHand);

        assert_eq!(sink.dropped(), 1);
        assert_eq!(rx.try_recv().ok(), Some(GestureEvent::Scroll { dy: 0.1 }));
    }

    #[test]
    fn test_recording_sink_take() {
        let mut sink = RecordingSink::new();
        sink.on_gesture(&GestureEvent::NoHand);
        assert_eq!(sink.take_events(), vec![GestureEvent::NoHand]);
        assert!(sink.events().is_empty());
    }
}
