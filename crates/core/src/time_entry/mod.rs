//! Time entry synchronization with the remote tracker

pub mod gateway;
pub mod ports;

pub use gateway::TimeEntryGateway;
