//! # Tally Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The start/ok/nok notification protocol every remote operation emits
//! - The dispatch seam events flow through
//! - The time entry gateway and its transport port
//! - The tracking state machine and timer
//!
//! ## Architecture Principles
//! - Only depends on `tally-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod dispatch;
pub mod notifications;
pub mod testing;
pub mod time_entry;
pub mod tracking;

// Re-export specific items to avoid ambiguity
pub use dispatch::{Dispatch, Event};
pub use notifications::{GatewayError, Notification, OperationKind};
pub use time_entry::gateway::{DeleteReceipt, GatewayContext, ListQuery, TimeEntryGateway};
pub use time_entry::ports::{Transport, TransportError};
pub use tracking::actions::{TrackingAction, TrackingState};
pub use tracking::timer::{TimeTracker, TrackerError, TrackingSnapshot};
