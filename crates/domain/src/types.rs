//! Domain types and models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TallyError};

/// Reference to a tracker resource (issue, user, activity).
///
/// Only `id` is ever transmitted; `name` exists for display purposes and is
/// skipped when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NamedRef {
    /// Create a bare reference carrying only an id.
    pub fn new(id: i64) -> Self {
        Self { id, name: None }
    }

    /// Create a reference with a display name.
    pub fn named(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: Some(name.into()) }
    }
}

/// A unit of work time logged against an issue, synchronized with the
/// remote tracker.
///
/// `id` is absent until the server assigns one. `spent_on` has day precision
/// and serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub issue: NamedRef,
    pub user: NamedRef,
    pub activity: NamedRef,
    pub spent_on: NaiveDate,
    pub hours: f64,
    pub comments: String,
}

impl TimeEntry {
    /// Validate domain invariants.
    ///
    /// # Errors
    /// Returns `TallyError::InvalidInput` if `hours` is not strictly
    /// positive.
    pub fn validate(&self) -> Result<()> {
        if self.hours <= 0.0 {
            return Err(TallyError::InvalidInput(format!(
                "time entry hours must be positive, got {}",
                self.hours
            )));
        }
        Ok(())
    }

    /// Produce a copy of this entry with the patched fields overridden.
    ///
    /// This is the optimistic client-side merge used when the server echo of
    /// an update is not trusted to carry full entry state.
    pub fn merged(&self, patch: &TimeEntryPatch) -> Self {
        let mut entry = self.clone();
        if let Some(comments) = &patch.comments {
            entry.comments = comments.clone();
        }
        if let Some(hours) = patch.hours {
            entry.hours = hours;
        }
        if let Some(activity) = &patch.activity {
            entry.activity = activity.clone();
        }
        if let Some(spent_on) = patch.spent_on {
            entry.spent_on = spent_on;
        }
        entry
    }
}

/// Partial patch for an existing time entry.
///
/// Only fields present here are considered modified; absent fields are left
/// untouched both locally and on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeEntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<NamedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent_on: Option<NaiveDate>,
}

impl TimeEntryPatch {
    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.comments.is_none()
            && self.hours.is_none()
            && self.activity.is_none()
            && self.spent_on.is_none()
    }
}

/// Phase of the single tracking session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingPhase {
    /// No active session.
    #[default]
    Idle,
    /// Clock accruing.
    Running,
    /// Session exists, clock frozen.
    Paused,
}
