//! Data Transfer Objects for the review API
//!
//! The review API answers with loosely typed JSON. DTOs here turn a decoded
//! payload into checked values or report exactly which field broke the
//! expected shape.

pub mod status;
