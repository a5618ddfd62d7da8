//! Column-wise extraction strategy.
//!
//! The image is smoothed, masked down to resistor-body pixels, and reduced to
//! one median HSV sample per fixed-width column group. Classified column
//! colors are then run-length grouped into bands and decoded.

use image::GrayImage;

use crate::calibration::{classify, representative_color};
use crate::config::DetectConfig;
use crate::decode::decode_bands;
use crate::hsv::{BgrImage, Hsv, HsvImage};
use crate::preprocess::{background_mask, bilateral_filter, body_mask, reflection_mask};
use crate::trace::{mask_snapshot, StepTrace};
use crate::{BandInfo, ColorName, DetectionResult};

pub(crate) fn run(image: &BgrImage, config: &DetectConfig) -> DetectionResult {
    let (width, height) = image.dimensions();
    let mut trace = StepTrace::new(config.verbose_trace);
    trace.record("original image", Some(image.clone()));

    let filtered = bilateral_filter(image, config.bilateral_diameter, config.bilateral_sigma);
    trace.record_verbose("filtered image", || filtered.clone());

    let hsv = HsvImage::from_bgr_image(&filtered);
    trace.record_verbose("hsv plane", || hsv.to_bgr_image());

    let reflections = reflection_mask(&hsv, config.reflection_value_min);
    trace.record_verbose("reflections", || mask_snapshot(&reflections));
    let background = background_mask(&hsv, config.background_tolerance);
    trace.record_verbose("background", || mask_snapshot(&background));
    let mask = body_mask(&reflections, &background);
    trace.record("resistor mask", Some(mask_snapshot(&mask)));

    let medians = column_group_medians(&hsv, &mask, config.column_group_width);
    let column_colors = broadcast_to_columns(&medians, config.column_group_width);
    trace.record(
        "median value of columns",
        Some(column_snapshot(&column_colors, width, height)),
    );

    let names: Vec<ColorName> = column_colors.iter().map(|&c| classify(c)).collect();
    trace.record(
        "detected color per column",
        Some(column_snapshot(
            &names.iter().map(|&n| representative_color(n)).collect::<Vec<_>>(),
            width,
            height,
        )),
    );

    let bands = segment_bands(&names, config.min_band_width());
    if bands.is_empty() {
        trace.record("no bands found", None);
    } else {
        trace.record(
            "detected color per band",
            Some(band_snapshot(&bands, height)),
        );
    }
    tracing::info!("{} bands found", bands.len());

    let resistance = decode_bands(&bands, config.band_count);
    tracing::debug!(resistance, "column strategy decode finished");

    DetectionResult {
        resistance_ohm: resistance,
        bands,
        steps: trace.into_records(),
        image_size: [width, height],
    }
}

/// One median HSV sample per full group of `group_width` columns.
///
/// Each channel's median is taken independently over the mask-included
/// pixels of the group (sorted, index count/2); a group with no included
/// pixels samples as all-zero. A trailing partial group is not sampled.
fn column_group_medians(hsv: &HsvImage, mask: &GrayImage, group_width: u32) -> Vec<Hsv> {
    let n_groups = hsv.width() / group_width;
    let mut medians = Vec::with_capacity(n_groups as usize);

    for g in 0..n_groups {
        let x0 = g * group_width;
        let mut h_vals = Vec::new();
        let mut s_vals = Vec::new();
        let mut v_vals = Vec::new();

        for x in x0..x0 + group_width {
            for y in 0..hsv.height() {
                if mask.get_pixel(x, y)[0] != 0 {
                    let px = hsv.get(x, y);
                    h_vals.push(px.h);
                    s_vals.push(px.s);
                    v_vals.push(px.v);
                }
            }
        }

        medians.push(Hsv::new(
            median_of(&mut h_vals),
            median_of(&mut s_vals),
            median_of(&mut v_vals),
        ));
    }

    medians
}

fn median_of(values: &mut [u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    values[values.len() / 2]
}

/// Broadcast each group sample back to all of its columns.
fn broadcast_to_columns(medians: &[Hsv], group_width: u32) -> Vec<Hsv> {
    let mut columns = Vec::with_capacity(medians.len() * group_width as usize);
    for &m in medians {
        for _ in 0..group_width {
            columns.push(m);
        }
    }
    columns
}

/// Run-length group consecutive equal column colors into bands.
///
/// The counted width deliberately excludes each run's first column: a run of
/// k equal columns counts as k-1. Runs below `min_width` or classified as
/// Unknown are dropped. This undercount is inherited behavior; results are
/// calibrated against it.
fn segment_bands(names: &[ColorName], min_width: u32) -> Vec<BandInfo> {
    let mut bands = Vec::new();
    let mut i = 0;

    while i < names.len() {
        let name = names[i];
        let mut width = 0u32;
        i += 1;

        while i < names.len() && names[i] == name {
            i += 1;
            width += 1;
        }

        if width >= min_width && name != ColorName::Unknown {
            bands.push(BandInfo { color: name, width });
        }
    }

    bands
}

/// Paint per-column colors across the full image height. Columns without a
/// sample (trailing partial group) stay black.
fn column_snapshot(columns: &[Hsv], width: u32, height: u32) -> BgrImage {
    let mut out = BgrImage::new(width, height);
    for (x, hsv) in columns.iter().enumerate() {
        let bgr = image::Rgb(hsv.to_bgr());
        for y in 0..height {
            out.put_pixel(x as u32, y, bgr);
        }
    }
    out
}

/// Paint the detected bands side by side at their counted widths.
fn band_snapshot(bands: &[BandInfo], height: u32) -> BgrImage {
    let width: u32 = bands.iter().map(|b| b.width).sum();
    let mut out = BgrImage::new(width, height);
    let mut x = 0;
    for band in bands {
        let bgr = image::Rgb(representative_color(band.color).to_bgr());
        for _ in 0..band.width {
            for y in 0..height {
                out.put_pixel(x, y, bgr);
            }
            x += 1;
        }
    }
    out
}
