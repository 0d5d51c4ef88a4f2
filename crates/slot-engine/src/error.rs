//! Error types for slot-engine operations.
//!
//! These cover caller contract violations only. A provider who does not work
//! on the requested day is a normal outcome and is reported through
//! [`SlotResult`](crate::model::SlotResult), not through this type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("Invalid duration: {0} minutes (must be a positive integer)")]
    InvalidDuration(i64),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time of day: {0} (expected HH:MM)")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
