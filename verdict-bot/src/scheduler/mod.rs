//! Scheduler layer for the watcher
//!
//! This layer owns the polling cadence and the poll cursor, and contains
//! every runtime failure so the loop never stops on its own.

pub mod poller;

pub use poller::StatusPoller;
