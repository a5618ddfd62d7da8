//! Image preprocessing: edge-preserving smoothing and the masks that isolate
//! resistor-body pixels.
//!
//! Two exclusion masks are built on the HSV plane: near-white highlights
//! (reflections on the lacquer) and everything close to the border-row mean
//! color (background and leads above/below the body). The surviving pixels
//! are the candidate resistor-body pixels every later statistic runs on.

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::erode;

use crate::hsv::{BgrImage, Hsv, HsvImage};

const MASK_ON: u8 = 255;

/// Edge-preserving bilateral smoothing of a BGR image.
///
/// Window diameter and the (shared) range/spatial sigma come from the
/// config; borders are clamped. Color distance is the L1 sum over the three
/// channels.
pub(crate) fn bilateral_filter(image: &BgrImage, diameter: u32, sigma: f32) -> BgrImage {
    let (width, height) = image.dimensions();
    let radius = (diameter / 2) as i64;
    let inv_two_sigma_sq = 1.0 / (2.0 * sigma * sigma);

    // Spatial weights for the fixed window.
    let side = (2 * radius + 1) as usize;
    let mut space_w = vec![0.0f32; side * side];
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = (dx * dx + dy * dy) as f32;
            space_w[((dy + radius) * side as i64 + dx + radius) as usize] =
                (-d2 * inv_two_sigma_sq).exp();
        }
    }

    // Range weights over the possible L1 color distances (3 * 255 max).
    let range_w: Vec<f32> = (0..=765)
        .map(|d| {
            let d = d as f32;
            (-d * d * inv_two_sigma_sq).exp()
        })
        .collect();

    let mut out = BgrImage::new(width, height);
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let center = image.get_pixel(x as u32, y as u32).0;
            let mut acc = [0.0f32; 3];
            let mut norm = 0.0f32;

            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let nx = (x + dx).clamp(0, width as i64 - 1) as u32;
                    let ny = (y + dy).clamp(0, height as i64 - 1) as u32;
                    let p = image.get_pixel(nx, ny).0;
                    let dist = (p[0] as i32 - center[0] as i32).unsigned_abs()
                        + (p[1] as i32 - center[1] as i32).unsigned_abs()
                        + (p[2] as i32 - center[2] as i32).unsigned_abs();
                    let w = space_w[((dy + radius) * side as i64 + dx + radius) as usize]
                        * range_w[dist as usize];
                    acc[0] += w * p[0] as f32;
                    acc[1] += w * p[1] as f32;
                    acc[2] += w * p[2] as f32;
                    norm += w;
                }
            }

            out.put_pixel(
                x as u32,
                y as u32,
                image::Rgb([
                    (acc[0] / norm).round() as u8,
                    (acc[1] / norm).round() as u8,
                    (acc[2] / norm).round() as u8,
                ]),
            );
        }
    }
    out
}

/// Mask of near-white highlights: value channel at or above the threshold.
///
/// The raw mask is grown and smoothed by eroding its inverse twice with a
/// 3x3 structuring element.
pub(crate) fn reflection_mask(hsv: &HsvImage, value_min: u8) -> GrayImage {
    let mut mask = GrayImage::new(hsv.width(), hsv.height());
    for y in 0..hsv.height() {
        for x in 0..hsv.width() {
            if hsv.get(x, y).v >= value_min {
                mask.put_pixel(x, y, Luma([MASK_ON]));
            }
        }
    }

    invert(&mut mask);
    let mut mask = erode(&mask, Norm::LInf, 2);
    invert(&mut mask);
    mask
}

/// Mask of pixels within the relative tolerance of the border-row mean
/// colors. The top row and the second-to-last row are sampled; the resistor
/// body is assumed to fill the frame edge to edge, leaving background and
/// leads only at the top and bottom.
pub(crate) fn background_mask(hsv: &HsvImage, tolerance: f32) -> GrayImage {
    let top = row_mean(hsv, 0);
    let bottom = row_mean(hsv, hsv.height() - 2);

    let mut mask = GrayImage::new(hsv.width(), hsv.height());
    for y in 0..hsv.height() {
        for x in 0..hsv.width() {
            let px = hsv.get(x, y);
            if within_tolerance(px, top, tolerance) || within_tolerance(px, bottom, tolerance) {
                mask.put_pixel(x, y, Luma([MASK_ON]));
            }
        }
    }
    mask
}

/// Candidate resistor-body pixels: NOT(reflections OR background).
pub(crate) fn body_mask(reflections: &GrayImage, background: &GrayImage) -> GrayImage {
    let (w, h) = reflections.dimensions();
    let mut mask = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let excluded = reflections.get_pixel(x, y)[0] != 0 || background.get_pixel(x, y)[0] != 0;
            if !excluded {
                mask.put_pixel(x, y, Luma([MASK_ON]));
            }
        }
    }
    mask
}

fn row_mean(hsv: &HsvImage, y: u32) -> [f32; 3] {
    let mut sum = [0.0f32; 3];
    for x in 0..hsv.width() {
        let px = hsv.get(x, y);
        sum[0] += px.h as f32;
        sum[1] += px.s as f32;
        sum[2] += px.v as f32;
    }
    let n = hsv.width() as f32;
    [sum[0] / n, sum[1] / n, sum[2] / n]
}

fn within_tolerance(px: Hsv, mean: [f32; 3], tolerance: f32) -> bool {
    let lo = 1.0 - tolerance;
    let hi = 1.0 + tolerance;
    let channels = [px.h as f32, px.s as f32, px.v as f32];
    channels
        .iter()
        .zip(mean.iter())
        .all(|(&c, &m)| c >= m * lo && c <= m * hi)
}

fn invert(mask: &mut GrayImage) {
    for px in mask.pixels_mut() {
        px[0] = MASK_ON - px[0];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::uniform_bgr;

    #[test]
    fn bilateral_preserves_uniform_regions() {
        let img = uniform_bgr(20, 10, [40, 90, 160]);
        let filtered = bilateral_filter(&img, 5, 80.0);
        for px in filtered.pixels() {
            assert_eq!(px.0, [40, 90, 160]);
        }
    }

    #[test]
    fn reflection_mask_grows_around_highlights() {
        // Dark image with a single bright pixel in the middle.
        let mut img = uniform_bgr(11, 11, [30, 30, 30]);
        img.put_pixel(5, 5, image::Rgb([255, 255, 255]));
        let hsv = HsvImage::from_bgr_image(&img);
        let mask = reflection_mask(&hsv, 200);

        assert_eq!(mask.get_pixel(5, 5)[0], MASK_ON);
        // Two erosion passes of the inverse grow the highlight by 2 px.
        assert_eq!(mask.get_pixel(3, 3)[0], MASK_ON);
        assert_eq!(mask.get_pixel(7, 7)[0], MASK_ON);
        assert_eq!(mask.get_pixel(2, 5)[0], 0);
    }

    #[test]
    fn background_mask_excludes_border_colored_pixels() {
        // Border rows grey, center saturated green.
        let mut img = uniform_bgr(10, 8, [128, 128, 128]);
        for y in 2..6 {
            for x in 0..10 {
                img.put_pixel(x, y, image::Rgb([20, 200, 20]));
            }
        }
        let hsv = HsvImage::from_bgr_image(&img);
        let mask = background_mask(&hsv, 0.4);

        assert_eq!(mask.get_pixel(0, 0)[0], MASK_ON);
        assert_eq!(mask.get_pixel(5, 7)[0], MASK_ON);
        assert_eq!(mask.get_pixel(5, 3)[0], 0);
    }

    #[test]
    fn body_mask_is_the_complement_of_the_union() {
        let mut refl = GrayImage::new(3, 1);
        let mut bg = GrayImage::new(3, 1);
        refl.put_pixel(0, 0, Luma([MASK_ON]));
        bg.put_pixel(1, 0, Luma([MASK_ON]));
        let body = body_mask(&refl, &bg);
        assert_eq!(body.get_pixel(0, 0)[0], 0);
        assert_eq!(body.get_pixel(1, 0)[0], 0);
        assert_eq!(body.get_pixel(2, 0)[0], MASK_ON);
    }
}
