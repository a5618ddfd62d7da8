//! High-level detection API.
//!
//! [`Detector`] is the primary entry point. It wraps a [`DetectConfig`] and
//! runs the configured extraction strategy on a single cropped resistor
//! image.

use crate::config::{BandCountMode, DetectConfig, StrategyKind};
use crate::error::DetectError;
use crate::hsv::BgrImage;
use crate::{pipeline, DetectionResult};

/// Primary detection interface.
///
/// Create once, configure, then detect on each captured region. The detector
/// itself is stateless across calls; only the configuration is held.
/// Configuration changes must not race an in-flight `detect` call.
///
/// # Examples
///
/// ```
/// use ohmscan::{BandCountMode, Detector};
///
/// let mut detector = Detector::new();
/// detector.config_mut().band_count = BandCountMode::Four;
/// let image = ohmscan::BgrImage::new(60, 20);
/// let result = detector.detect(&image).unwrap();
/// assert!(!result.is_determined());
/// ```
pub struct Detector {
    config: DetectConfig,
}

impl Detector {
    /// Create a detector with the default (columns, auto band count)
    /// configuration.
    pub fn new() -> Self {
        Self {
            config: DetectConfig::default(),
        }
    }

    /// Create a detector with an explicit strategy.
    pub fn with_strategy(strategy: StrategyKind) -> Self {
        Self {
            config: DetectConfig {
                strategy,
                ..Default::default()
            },
        }
    }

    /// Create with full config control.
    pub fn with_config(config: DetectConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut DetectConfig {
        &mut self.config
    }

    /// Set the band-count assumption for subsequent calls.
    pub fn set_band_count(&mut self, mode: BandCountMode) {
        self.config.band_count = mode;
    }

    /// Detect the resistance encoded in a cropped BGR resistor region.
    ///
    /// The caller owns the returned result; it is never mutated after
    /// return. Invalid inputs fail fast without a partial result.
    pub fn detect(&self, image: &BgrImage) -> Result<DetectionResult, DetectError> {
        pipeline::detect(image, &self.config)
    }

    /// Detect from a raw interleaved BGR byte buffer (`height * width * 3`
    /// bytes, row-major).
    pub fn detect_raw(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<DetectionResult, DetectError> {
        let expected = width as usize * height as usize * 3;
        let image = BgrImage::from_raw(width, height, data.to_vec()).ok_or(
            DetectError::ChannelMismatch {
                expected,
                actual: data.len(),
            },
        )?;
        self.detect(&image)
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::uniform_bgr;
    use crate::UNDETERMINED_RESISTANCE;

    #[test]
    fn detector_runs_both_strategies() {
        let img = uniform_bgr(30, 10, [128, 128, 128]);
        for strategy in [StrategyKind::Columns, StrategyKind::Contours] {
            let det = Detector::with_strategy(strategy);
            let result = det.detect(&img).unwrap();
            assert_eq!(result.resistance_ohm, UNDETERMINED_RESISTANCE);
            assert_eq!(result.image_size, [30, 10]);
        }
    }

    #[test]
    fn detector_config_mut() {
        let mut det = Detector::new();
        det.set_band_count(BandCountMode::Five);
        assert_eq!(det.config().band_count, BandCountMode::Five);
    }

    #[test]
    fn raw_buffer_length_is_validated() {
        let det = Detector::new();
        let err = det.detect_raw(&[0u8; 10], 4, 4).unwrap_err();
        assert_eq!(
            err,
            DetectError::ChannelMismatch {
                expected: 48,
                actual: 10
            }
        );
    }

    #[test]
    fn raw_buffer_round_trip_matches_image_entry_point() {
        let img = uniform_bgr(12, 6, [30, 60, 90]);
        let det = Detector::new();
        let a = det.detect(&img).unwrap();
        let b = det.detect_raw(img.as_raw(), 12, 6).unwrap();
        assert_eq!(a.resistance_ohm, b.resistance_ohm);
        assert_eq!(a.bands.len(), b.bands.len());
    }
}
