//! Elapsed-duration presentation helpers

/// Format an elapsed duration in milliseconds as `HH:mm:ss`.
///
/// The value is treated as a zero-based clock, not a time of day; hours grow
/// past 24 instead of wrapping. Sub-second remainders are truncated.
pub fn format_clock(elapsed_ms: u64) -> String {
    let total_secs = elapsed_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
