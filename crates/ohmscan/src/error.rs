//! Input-validation errors.
//!
//! Only invalid inputs abort a detection call. Calibration overlaps are
//! logged warnings and an undecodable band sequence is the defined
//! "undetermined" outcome, not an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("input image is empty ({width}x{height})")]
    EmptyInput { width: u32, height: u32 },

    #[error("input buffer holds {actual} bytes, expected {expected} (w*h*3)")]
    ChannelMismatch { expected: usize, actual: usize },

    #[error("input region is {height} rows tall; background sampling needs at least 2")]
    RegionTooSmall { height: u32 },
}
