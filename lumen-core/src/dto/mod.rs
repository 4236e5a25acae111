//! Data Transfer Objects
//!
//! Request shapes sent to the remote media API, listing envelopes it returns,
//! and the operation result envelope handed to downstream callers.

pub mod job;
pub mod listing;
pub mod outcome;
