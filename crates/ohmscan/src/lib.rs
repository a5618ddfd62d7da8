//! ohmscan: resistor color-band detection from cropped photos.
//!
//! Given one BGR pixel region tightly framing a resistor body, the detector
//! recovers the encoded resistance value. The pipeline stages are:
//!
//! 1. **Preprocess**: bilateral smoothing, HSV conversion, reflection and
//!    background masks isolating resistor-body pixels.
//! 2. **Sample**: one median HSV color per fixed-width column group.
//! 3. **Classify**: calibrated HSV bound table mapping samples to band
//!    color names.
//! 4. **Segment**: run-length grouping of column colors into bands.
//! 5. **Decode**: band-count-aware color-code arithmetic.
//!
//! An alternate contour strategy ([`StrategyKind::Contours`]) localizes each
//! calibrated color via connected-region centroids instead of column scans
//! and decodes the left-to-right location sequence directly.
//!
//! # Public API
//! - [`Detector`] as the primary entry point
//! - [`DetectConfig`], [`BandCountMode`], [`StrategyKind`] for tuning
//! - [`DetectionResult`], [`BandInfo`], [`StepRecord`] as outputs
//! - [`classify`] / [`representative_color`] for direct sample lookups

mod api;
mod calibration;
mod color;
mod config;
mod decode;
mod error;
mod hsv;
mod pipeline;
mod preprocess;
mod trace;

#[cfg(test)]
mod test_utils;

pub use api::Detector;
pub use calibration::{classify, representative_color, ColorBound};
pub use color::ColorName;
pub use config::{BandCountMode, DetectConfig, StrategyKind};
pub use error::DetectError;
pub use hsv::{BgrImage, Hsv};
pub use trace::StepRecord;

/// Sentinel resistance meaning "no valid value could be decoded".
pub const UNDETERMINED_RESISTANCE: i64 = -1;

/// One detected resistor band, ordered left to right by scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BandInfo {
    /// Classified band color.
    pub color: ColorName,
    /// Counted run width in pixels.
    pub width: u32,
}

/// Full detection outcome for a single image region.
///
/// Built fresh per call and owned exclusively by the caller; never mutated
/// after return.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DetectionResult {
    /// Decoded resistance in ohms, or [`UNDETERMINED_RESISTANCE`].
    pub resistance_ohm: i64,
    /// Detected bands in scan order (empty for the contour strategy, which
    /// reports locations rather than measured bands).
    pub bands: Vec<BandInfo>,
    /// Observational step trace; never affects the decoded value.
    pub steps: Vec<StepRecord>,
    /// Input dimensions [width, height].
    pub image_size: [u32; 2],
}

impl DetectionResult {
    /// True when a resistance value was decoded.
    pub fn is_determined(&self) -> bool {
        self.resistance_ohm != UNDETERMINED_RESISTANCE
    }
}
