//! Domain utilities

pub mod duration;
