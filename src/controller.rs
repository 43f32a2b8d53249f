//! Frame loop glue between the provider, the classifier and the sink.

use crate::core::classifier::{GestureClassifier, GestureThresholds};
use crate::landmarks::types::{LandmarkFrame, Timestamp};
use crate::sink::EventSink;
use crate::stats::SharedSessionLog;

/// Owns the classifier and dispatches its events to a sink.
///
/// While disabled, delivered frames are ignored entirely: they are not
/// classified and produce no events, and classifier state is left as is.
pub struct GestureController<S: EventSink> {
    classifier: GestureClassifier,
    sink: S,
    enabled: bool,
    log: Option<SharedSessionLog>,
}

impl<S: EventSink> GestureController<S> {
    /// Create an enabled controller.
    pub fn new(thresholds: GestureThresholds, sink: S) -> Self {
        Self {
            classifier: GestureClassifier::new(thresholds),
            sink,
            enabled: true,
            log: None,
        }
    }

    /// Record frames and events into a session log.
    pub fn with_log(mut self, log: SharedSessionLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn enable(&mut self) {
        if !self.enabled {
            tracing::info!("Gesture control enabled");
        }
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        if self.enabled {
            tracing::info!("Gesture control disabled");
        }
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Classify one frame and deliver its events in order.
    ///
    /// Returns the number of events delivered.
    pub fn handle_frame(&mut self, frame: &LandmarkFrame, now: Timestamp) -> usize {
        if !self.enabled {
            return 0;
        }

        let events = self.classifier.process_frame(frame, now);
        if let Some(ref log) = self.log {
            log.record_frame(frame);
        }

        for event in &events {
            if let Some(ref log) = self.log {
                log.record_event(event);
            }
            self.sink.on_gesture(event);
        }
        events.len()
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
