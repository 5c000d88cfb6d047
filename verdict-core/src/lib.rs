//! Verdict Core
//!
//! Core types and rules for the homework review watcher.
//!
//! This crate contains:
//! - Domain types: work items, review statuses and the poll cursor
//! - DTOs: validation of the raw status payload returned by the review API
//!
//! Nothing here performs I/O; clients and the poll loop live in other crates.

pub mod domain;
pub mod dto;

pub use domain::cursor::PollCursor;
pub use domain::homework::{ReviewStatus, StatusError, WorkItem, parse_status};
pub use dto::status::{MalformedResponse, StatusResponse, check_response};
