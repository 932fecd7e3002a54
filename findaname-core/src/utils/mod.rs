//! Shared utilities.

pub mod datetime;
