//! Core domain types
//!
//! These structures mirror the records owned by the remote media API. The
//! local side only ever reads them; every mutation happens remotely.

pub mod asset;
pub mod job;
pub mod style;
