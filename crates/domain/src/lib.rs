//! # Tally Domain
//!
//! Business domain types and models for Tally.
//!
//! This crate contains:
//! - Domain data types (TimeEntry, NamedRef, TrackingPhase)
//! - Domain error types and Result definitions
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Tally crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
pub use utils::duration::format_clock;
