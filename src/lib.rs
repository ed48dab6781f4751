//! UniConvert Library
//!
//! Core functionality for unit conversion and visit streak tracking.

pub mod build_info;
pub mod conversion;
pub mod streak;
