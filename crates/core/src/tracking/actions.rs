//! Pure tracking transition descriptors and the observable-state reducer
//!
//! Actions carry no side effects; they describe transitions for whatever
//! state container consumes the dispatch seam. The timer in
//! [`super::timer`] is the only emitter.

use serde::{Deserialize, Serialize};
use tally_domain::NamedRef;

/// State transition descriptor emitted by the tracking timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingAction {
    /// A session began for `issue`.
    Start { issue: NamedRef },
    /// The session ended; `duration_ms` is the final elapsed time.
    Stop { duration_ms: u64 },
    /// The clock froze at `duration_ms`.
    Pause { duration_ms: u64 },
    /// The clock resumed.
    Continue,
    /// The session was discarded.
    Reset,
}

/// Externally observable tracking state, derived by folding actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingState {
    pub is_enabled: bool,
    pub is_paused: bool,
    pub duration_ms: u64,
    pub issue: Option<NamedRef>,
}

impl TrackingState {
    /// Fold one action into the state.
    pub fn apply(&mut self, action: &TrackingAction) {
        match action {
            TrackingAction::Start { issue } => {
                *self = Self {
                    is_enabled: true,
                    is_paused: false,
                    duration_ms: 0,
                    issue: Some(issue.clone()),
                };
            }
            TrackingAction::Pause { duration_ms } => {
                if self.is_enabled {
                    self.is_paused = true;
                    self.duration_ms = *duration_ms;
                }
            }
            TrackingAction::Continue => {
                if self.is_enabled {
                    self.is_paused = false;
                }
            }
            TrackingAction::Stop { .. } | TrackingAction::Reset => {
                *self = Self::default();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_enables_and_zeroes_duration() {
        let mut state = TrackingState { duration_ms: 500, ..Default::default() };
        state.apply(&TrackingAction::Start { issue: NamedRef::new(1) });

        assert!(state.is_enabled);
        assert!(!state.is_paused);
        assert_eq!(state.duration_ms, 0);
        assert_eq!(state.issue, Some(NamedRef::new(1)));
    }

    #[test]
    fn pause_freezes_duration() {
        let mut state = TrackingState::default();
        state.apply(&TrackingAction::Start { issue: NamedRef::new(1) });
        state.apply(&TrackingAction::Pause { duration_ms: 3000 });

        assert!(state.is_enabled);
        assert!(state.is_paused);
        assert_eq!(state.duration_ms, 3000);
    }

    #[test]
    fn continue_clears_pause_flag_only() {
        let mut state = TrackingState::default();
        state.apply(&TrackingAction::Start { issue: NamedRef::new(1) });
        state.apply(&TrackingAction::Pause { duration_ms: 3000 });
        state.apply(&TrackingAction::Continue);

        assert!(!state.is_paused);
        assert_eq!(state.duration_ms, 3000);
    }

    #[test]
    fn stop_and_reset_return_to_idle() {
        for terminal in [TrackingAction::Stop { duration_ms: 4000 }, TrackingAction::Reset] {
            let mut state = TrackingState::default();
            state.apply(&TrackingAction::Start { issue: NamedRef::new(1) });
            state.apply(&terminal);
            assert_eq!(state, TrackingState::default());
        }
    }

    #[test]
    fn pause_and_continue_are_ignored_while_idle() {
        let mut state = TrackingState::default();
        state.apply(&TrackingAction::Pause { duration_ms: 1000 });
        state.apply(&TrackingAction::Continue);
        assert_eq!(state, TrackingState::default());
    }
}
