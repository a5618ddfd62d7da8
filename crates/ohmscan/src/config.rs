//! Detection configuration.

use serde::{Deserialize, Serialize};

/// How many bands the decoder should assume the resistor has, including the
/// tolerance ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandCountMode {
    /// Decode whatever band count was found (generic 4-band fallback).
    #[default]
    Auto,
    /// Assume a four-band resistor (two digits + multiplier + tolerance).
    Four,
    /// Assume a five-band resistor (three digits + multiplier + tolerance).
    Five,
}

/// Which extraction strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Column-wise median sampling + run-length band segmentation.
    #[default]
    Columns,
    /// Per-color contour centroids ordered left to right.
    Contours,
}

/// Top-level detection configuration.
///
/// Defaults reproduce the calibrated constants; individual fields can be
/// overridden after construction. The band-count mode and strategy are the
/// two knobs callers normally touch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectConfig {
    /// Band-count assumption used by the decoder.
    pub band_count: BandCountMode,
    /// Extraction strategy selector.
    pub strategy: StrategyKind,
    /// Number of columns combined into one median sample (columns strategy).
    pub column_group_width: u32,
    /// Bilateral filter window diameter in pixels.
    pub bilateral_diameter: u32,
    /// Bilateral filter range and spatial sigma.
    pub bilateral_sigma: f32,
    /// Minimum value (brightness) for a pixel to count as a reflection.
    pub reflection_value_min: u8,
    /// Relative tolerance around the border-row mean color for the
    /// background mask (0.4 = +/-40% per channel).
    pub background_tolerance: f32,
    /// Minimum connected-region area in pixels (contours strategy).
    pub min_contour_area_px: u32,
    /// Centroids closer than this many pixels are treated as shards of the
    /// same band (contours strategy).
    pub contour_merge_radius_px: i64,
    /// Record every intermediate snapshot in the step trace, not just the
    /// stage-boundary ones.
    pub verbose_trace: bool,
}

impl DetectConfig {
    /// Minimum counted run width for a column run to be kept as a band.
    ///
    /// One more than the sampling group width, so a band must span at least
    /// two column groups.
    pub fn min_band_width(&self) -> u32 {
        self.column_group_width + 1
    }
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            band_count: BandCountMode::Auto,
            strategy: StrategyKind::Columns,
            column_group_width: 5,
            bilateral_diameter: 5,
            bilateral_sigma: 80.0,
            reflection_value_min: 200,
            background_tolerance: 0.4,
            min_contour_area_px: 20,
            contour_merge_radius_px: 10,
            verbose_trace: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants_are_stable() {
        let cfg = DetectConfig::default();
        assert_eq!(cfg.column_group_width, 5);
        assert_eq!(cfg.min_band_width(), 6);
        assert_eq!(cfg.bilateral_diameter, 5);
        assert!((cfg.bilateral_sigma - 80.0).abs() < 1e-6);
        assert_eq!(cfg.reflection_value_min, 200);
        assert!((cfg.background_tolerance - 0.4).abs() < 1e-6);
        assert_eq!(cfg.min_contour_area_px, 20);
        assert_eq!(cfg.contour_merge_radius_px, 10);
        assert!(!cfg.verbose_trace);
        assert_eq!(cfg.band_count, BandCountMode::Auto);
        assert_eq!(cfg.strategy, StrategyKind::Columns);
    }

    #[test]
    fn config_json_round_trip() {
        let cfg = DetectConfig {
            band_count: BandCountMode::Five,
            strategy: StrategyKind::Contours,
            ..Default::default()
        };
        let s = serde_json::to_string(&cfg).unwrap();
        let back: DetectConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(back.band_count, BandCountMode::Five);
        assert_eq!(back.strategy, StrategyKind::Contours);
    }
}
