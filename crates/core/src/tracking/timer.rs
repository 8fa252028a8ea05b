//! The stateful tracking timer
//!
//! At most one session exists at a time. While `Running`, a background task
//! adds exactly [`TICK_MS`] per interval fire; the duration is tick-counted,
//! not wall-clock measured. Every transition out of `Running` cancels the
//! tick task and awaits its completion, so no in-flight tick can land after
//! cancellation is requested.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tally_domain::constants::TICK_MS;
use tally_domain::{format_clock, NamedRef, TrackingPhase};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::actions::TrackingAction;
use crate::dispatch::{Dispatch, Event};

/// Invalid-transition errors.
///
/// All tracker operations are local state mutations; misuse fails fast and
/// mutates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// `start` was called while a session already exists; the caller must
    /// stop or reset the prior session first.
    #[error("a session is already being tracked")]
    AlreadyTracking,

    /// `stop` was called with no session.
    #[error("no active session")]
    NotTracking,

    /// `pause` was called outside `Running`.
    #[error("session is not running")]
    NotRunning,

    /// `resume` was called outside `Paused`.
    #[error("session is not paused")]
    NotPaused,
}

/// Read-only copy of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSnapshot {
    pub phase: TrackingPhase,
    pub elapsed_ms: u64,
    pub issue: Option<NamedRef>,
}

#[derive(Debug, Default)]
struct Session {
    issue: Option<NamedRef>,
    elapsed_ms: u64,
    phase: TrackingPhase,
}

/// Single-instance tracking timer.
///
/// Owns the session exclusively; callers read snapshots and route all
/// mutation through the transition methods. Transitions emit
/// [`TrackingAction`] descriptors through the dispatch seam.
pub struct TimeTracker {
    dispatch: Arc<dyn Dispatch>,
    tick_interval: Duration,
    session: Arc<Mutex<Session>>,
    cancel: CancellationToken,
    tick_task: Option<JoinHandle<()>>,
}

impl TimeTracker {
    pub fn new(dispatch: Arc<dyn Dispatch>) -> Self {
        Self {
            dispatch,
            tick_interval: Duration::from_millis(TICK_MS),
            session: Arc::new(Mutex::new(Session::default())),
            cancel: CancellationToken::new(),
            tick_task: None,
        }
    }

    /// Override the tick interval. Each fire still accounts for [`TICK_MS`]
    /// of elapsed time; production uses the 1-second default. The interval
    /// must be non-zero, so zero falls back to the default.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval =
            if interval.is_zero() { Duration::from_millis(TICK_MS) } else { interval };
        self
    }

    /// Begin tracking `issue` from zero.
    ///
    /// # Errors
    /// Returns [`TrackerError::AlreadyTracking`] unless the tracker is idle.
    pub fn start(&mut self, issue: NamedRef) -> Result<(), TrackerError> {
        self.start_from(issue, 0)
    }

    /// Begin tracking `issue`, resuming from a previously accrued value.
    ///
    /// # Errors
    /// Returns [`TrackerError::AlreadyTracking`] unless the tracker is idle.
    pub fn start_from(&mut self, issue: NamedRef, initial_ms: u64) -> Result<(), TrackerError> {
        {
            let mut session = self.session.lock();
            if session.phase != TrackingPhase::Idle {
                return Err(TrackerError::AlreadyTracking);
            }
            session.issue = Some(issue.clone());
            session.elapsed_ms = initial_ms;
            session.phase = TrackingPhase::Running;
        }

        info!(issue_id = issue.id, initial_ms, "tracking started");
        self.dispatch.dispatch(Event::Tracking(TrackingAction::Start { issue }));
        self.spawn_tick_task();
        Ok(())
    }

    /// Freeze the clock, emitting `Pause` with the elapsed value.
    ///
    /// # Errors
    /// Returns [`TrackerError::NotRunning`] unless the session is running.
    pub async fn pause(&mut self) -> Result<u64, TrackerError> {
        if self.session.lock().phase != TrackingPhase::Running {
            return Err(TrackerError::NotRunning);
        }

        self.halt_clock().await;
        let elapsed = {
            let mut session = self.session.lock();
            session.phase = TrackingPhase::Paused;
            session.elapsed_ms
        };

        debug!(elapsed_ms = elapsed, "tracking paused");
        self.dispatch.dispatch(Event::Tracking(TrackingAction::Pause { duration_ms: elapsed }));
        Ok(elapsed)
    }

    /// Resume the clock, emitting `Continue`.
    ///
    /// # Errors
    /// Returns [`TrackerError::NotPaused`] unless the session is paused.
    pub fn resume(&mut self) -> Result<(), TrackerError> {
        {
            let mut session = self.session.lock();
            if session.phase != TrackingPhase::Paused {
                return Err(TrackerError::NotPaused);
            }
            session.phase = TrackingPhase::Running;
        }

        debug!("tracking resumed");
        self.dispatch.dispatch(Event::Tracking(TrackingAction::Continue));
        self.spawn_tick_task();
        Ok(())
    }

    /// End the session, emitting `Stop` with the final elapsed value and
    /// resetting to idle. Returns the final value for persistence.
    ///
    /// # Errors
    /// Returns [`TrackerError::NotTracking`] when idle.
    pub async fn stop(&mut self) -> Result<u64, TrackerError> {
        if self.session.lock().phase == TrackingPhase::Idle {
            return Err(TrackerError::NotTracking);
        }

        self.halt_clock().await;
        let final_ms = {
            let mut session = self.session.lock();
            let elapsed = session.elapsed_ms;
            *session = Session::default();
            elapsed
        };

        info!(elapsed_ms = final_ms, "tracking stopped");
        self.dispatch.dispatch(Event::Tracking(TrackingAction::Stop { duration_ms: final_ms }));
        Ok(final_ms)
    }

    /// Discard the session unconditionally, emitting `Reset`.
    pub async fn reset(&mut self) {
        self.halt_clock().await;
        *self.session.lock() = Session::default();
        debug!("tracking reset");
        self.dispatch.dispatch(Event::Tracking(TrackingAction::Reset));
    }

    /// Deterministic dispose contract for the owning application.
    ///
    /// A running clock is paused first (emitting `Pause`, so the elapsed
    /// value is observed rather than silently lost), then any remaining
    /// timer is halted. A paused or idle tracker is left as-is.
    pub async fn shutdown(&mut self) {
        let running = self.session.lock().phase == TrackingPhase::Running;
        if running {
            // cannot fail: phase was Running and only we mutate it
            let _ = self.pause().await;
        }
        self.halt_clock().await;
        info!("tracker shut down");
    }

    /// Read-only copy of the current session.
    pub fn snapshot(&self) -> TrackingSnapshot {
        let session = self.session.lock();
        TrackingSnapshot {
            phase: session.phase,
            elapsed_ms: session.elapsed_ms,
            issue: session.issue.clone(),
        }
    }

    /// Elapsed time rendered as a zero-based `HH:mm:ss` clock.
    pub fn elapsed_clock(&self) -> String {
        format_clock(self.session.lock().elapsed_ms)
    }

    fn spawn_tick_task(&mut self) {
        self.cancel = CancellationToken::new();
        let cancel = self.cancel.clone();
        let session = Arc::clone(&self.session);
        let interval = self.tick_interval;

        self.tick_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick of a fresh interval completes immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        session.lock().elapsed_ms += TICK_MS;
                    }
                }
            }
        }));
    }

    async fn halt_clock(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.tick_task.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TimeTracker {
    fn drop(&mut self) {
        // last-resort backstop; the owning application should call
        // `shutdown()` so the tick task is awaited, not merely cancelled
        self.cancel.cancel();
    }
}
