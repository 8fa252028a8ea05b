//! Dispatch seam between the core and whatever consumes its events
//!
//! The core never inspects how events are consumed downstream; it only
//! pushes them through a [`Dispatch`] implementation supplied by the owning
//! application.

use tokio::sync::mpsc;

use crate::notifications::Notification;
use crate::tracking::actions::TrackingAction;

/// Everything the core emits: operation notifications and tracking
/// transition descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Notification(Notification),
    Tracking(TrackingAction),
}

/// Single-argument event sink.
///
/// Implementations must tolerate being called from any task; the core makes
/// no ordering promises across concurrent operations of different kinds.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, event: Event);
}

/// Channel-backed dispatch for applications that drain events from a task.
///
/// A closed receiver drops the event silently; the core does not treat a
/// departed consumer as an error.
impl Dispatch for mpsc::UnboundedSender<Event> {
    fn dispatch(&self, event: Event) {
        let _ = self.send(event);
    }
}
