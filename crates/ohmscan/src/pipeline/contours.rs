//! Contour-centroid extraction strategy.
//!
//! Instead of scanning columns, every calibrated color is thresholded into a
//! binary mask, connected regions are reduced to area-weighted centroid
//! x-positions, and the surviving left-to-right location sequence is decoded
//! directly with the four-band formula.

use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};

use crate::calibration::bounds_for;
use crate::config::DetectConfig;
use crate::hsv::{BgrImage, HsvImage};
use crate::preprocess::bilateral_filter;
use crate::trace::{mask_snapshot, StepTrace};
use crate::{ColorName, DetectionResult, UNDETERMINED_RESISTANCE};

/// One accepted color location: centroid x, the band color found there, and
/// the region area that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColorLocation {
    x: i64,
    color: ColorName,
    area: u32,
}

pub(crate) fn run(image: &BgrImage, config: &DetectConfig) -> DetectionResult {
    let (width, height) = image.dimensions();
    let mut trace = StepTrace::new(config.verbose_trace);
    trace.record("original image", Some(image.clone()));

    let filtered = bilateral_filter(image, config.bilateral_diameter, config.bilateral_sigma);
    trace.record_verbose("filtered image", || filtered.clone());

    let hsv = HsvImage::from_bgr_image(&filtered);

    let mut locations: Vec<ColorLocation> = Vec::new();
    for color in ColorName::CALIBRATED {
        let mask = threshold_color(&hsv, color);
        trace.record(format!("area of color {color}"), Some(mask_snapshot(&mask)));

        for (cx, area) in region_centroids(&mask, config.min_contour_area_px) {
            merge_location(
                &mut locations,
                ColorLocation { x: cx, color, area },
                config.contour_merge_radius_px,
            );
        }
    }

    locations.sort_by_key(|loc| loc.x);
    tracing::info!("{} color locations found", locations.len());

    let resistance = if locations.len() >= 3 {
        decode_locations(&locations)
    } else {
        UNDETERMINED_RESISTANCE
    };
    tracing::debug!(resistance, "contour strategy decode finished");

    DetectionResult {
        resistance_ohm: resistance,
        bands: Vec::new(),
        steps: trace.into_records(),
        image_size: [width, height],
    }
}

/// Binary mask of pixels inside any of the color's calibrated bounds.
/// Red contributes the union of its two hue ranges.
fn threshold_color(hsv: &HsvImage, color: ColorName) -> GrayImage {
    let bounds = bounds_for(color);
    let mut mask = GrayImage::new(hsv.width(), hsv.height());
    for y in 0..hsv.height() {
        for x in 0..hsv.width() {
            let px = hsv.get(x, y);
            if bounds.iter().any(|b| b.contains(px)) {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }
    mask
}

/// Centroid x-coordinates of 8-connected foreground regions larger than
/// `min_area` pixels, from first-order moments (sum of x over area).
fn region_centroids(mask: &GrayImage, min_area: u32) -> Vec<(i64, u32)> {
    let labeled = connected_components(mask, Connectivity::Eight, Luma([0u8]));

    let mut areas: Vec<u32> = Vec::new();
    let mut x_sums: Vec<u64> = Vec::new();
    for (x, _y, px) in labeled.enumerate_pixels() {
        let label = px[0] as usize;
        if label == 0 {
            continue;
        }
        if label >= areas.len() {
            areas.resize(label + 1, 0);
            x_sums.resize(label + 1, 0);
        }
        areas[label] += 1;
        x_sums[label] += x as u64;
    }

    areas
        .iter()
        .zip(x_sums.iter())
        .filter(|&(&area, _)| area > min_area)
        .map(|(&area, &x_sum)| ((x_sum / area as u64) as i64, area))
        .collect()
}

/// Insert a candidate location, deduplicating shards of the same band.
///
/// An existing location within the merge radius survives only if its area is
/// strictly larger; an equal or larger later find replaces it.
fn merge_location(locations: &mut Vec<ColorLocation>, candidate: ColorLocation, radius: i64) {
    let mut idx = 0;
    while idx < locations.len() {
        if (locations[idx].x - candidate.x).abs() < radius {
            if locations[idx].area > candidate.area {
                return;
            }
            locations.remove(idx);
            continue;
        }
        idx += 1;
    }
    locations.push(candidate);
}

/// Four-band decode of the three leftmost locations; the color's digit is its
/// index in the calibrated order. Further locations (tolerance ring) are
/// ignored.
fn decode_locations(locations: &[ColorLocation]) -> i64 {
    let digits: Vec<i64> = locations
        .iter()
        .take(3)
        .filter_map(|loc| loc.color.digit())
        .collect();
    if digits.len() < 3 {
        return UNDETERMINED_RESISTANCE;
    }
    (digits[0] * 10 + digits[1]) * 10i64.pow(digits[2] as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fill_rect, uniform_bgr, BLACK_BGR, BROWN_BGR, ORANGE_BGR};

    #[test]
    fn centroids_of_small_regions_are_discarded() {
        let mut mask = GrayImage::new(30, 10);
        // 4x4 = 16 px, at or below the gate.
        fill_rect(&mut mask, 2, 2, 4, 4, Luma([255]));
        // 5x5 = 25 px, accepted, centered on x = 22.
        fill_rect(&mut mask, 20, 2, 5, 5, Luma([255]));

        let centroids = region_centroids(&mask, 20);
        assert_eq!(centroids, vec![(22, 25)]);
    }

    #[test]
    fn merge_keeps_the_larger_area_within_radius() {
        let mut locations = Vec::new();
        let a = ColorLocation {
            x: 50,
            color: ColorName::Red,
            area: 100,
        };
        merge_location(&mut locations, a, 10);

        // Smaller shard nearby: dropped.
        let b = ColorLocation {
            x: 55,
            color: ColorName::Brown,
            area: 40,
        };
        merge_location(&mut locations, b, 10);
        assert_eq!(locations, vec![a]);

        // Equal-area later find replaces the earlier one.
        let c = ColorLocation {
            x: 47,
            color: ColorName::Green,
            area: 100,
        };
        merge_location(&mut locations, c, 10);
        assert_eq!(locations, vec![c]);

        // Far-away location is stored independently.
        let d = ColorLocation {
            x: 80,
            color: ColorName::Blue,
            area: 30,
        };
        merge_location(&mut locations, d, 10);
        assert_eq!(locations.len(), 2);
    }

    #[test]
    fn three_stripe_image_decodes_to_10k() {
        let mut img = uniform_bgr(45, 12, BROWN_BGR);
        fill_rect(&mut img, 15, 0, 15, 12, image::Rgb(BLACK_BGR));
        fill_rect(&mut img, 30, 0, 15, 12, image::Rgb(ORANGE_BGR));

        let cfg = DetectConfig::default();
        let result = run(&img, &cfg);
        assert_eq!(result.resistance_ohm, 10_000);
        assert!(result.bands.is_empty());
        assert!(result
            .steps
            .iter()
            .any(|s| s.label == "area of color orange"));
    }

    #[test]
    fn fewer_than_three_locations_is_undetermined() {
        let img = uniform_bgr(40, 10, BLACK_BGR);
        let result = run(&img, &DetectConfig::default());
        assert_eq!(result.resistance_ohm, UNDETERMINED_RESISTANCE);
    }
}
