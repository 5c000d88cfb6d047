//! Core domain types
//!
//! This module contains the structures the watcher reasons about: the
//! submitted work items, the closed set of review statuses, and the
//! cursor that bounds each poll's query window.

pub mod cursor;
pub mod homework;
