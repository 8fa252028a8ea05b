//! Shared test doubles
//!
//! Used by this crate's unit tests and by integration tests in the infra
//! layer.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::dispatch::{Dispatch, Event};
use crate::notifications::Notification;
use crate::tracking::actions::TrackingAction;

/// Dispatch double that records every event for later assertions.
#[derive(Default)]
pub struct RecordingDispatch {
    events: Mutex<Vec<Event>>,
}

impl RecordingDispatch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All recorded events, in dispatch order.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Only the notification-protocol events, in dispatch order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Notification(n) => Some(n),
                Event::Tracking(_) => None,
            })
            .collect()
    }

    /// Only the tracking transition descriptors, in dispatch order.
    pub fn tracking_actions(&self) -> Vec<TrackingAction> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Tracking(a) => Some(a),
                Event::Notification(_) => None,
            })
            .collect()
    }
}

impl Dispatch for RecordingDispatch {
    fn dispatch(&self, event: Event) {
        self.events.lock().push(event);
    }
}
