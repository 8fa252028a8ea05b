//! Domain constants

/// Milliseconds added to an active session per timer tick.
///
/// The tracking clock is tick-counted: one interval fire adds exactly this
/// amount, with no sub-second correction for scheduling jitter.
pub const TICK_MS: u64 = 1000;

/// Date format used for `spent_on` on the wire (day precision, never a
/// timestamp).
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
