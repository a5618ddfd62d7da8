//! Shared synthetic-image helpers for unit tests.

use image::{ImageBuffer, Pixel};

use crate::hsv::BgrImage;

/// Brown band color (BGR), mid-bound: HSV (10, 191, 80).
pub(crate) const BROWN_BGR: [u8; 3] = [20, 40, 80];
/// Black band color (BGR): HSV (0, 0, 10).
pub(crate) const BLACK_BGR: [u8; 3] = [10, 10, 10];
/// Orange band color (BGR): HSV (12, 241, 180), below the reflection cutoff.
pub(crate) const ORANGE_BGR: [u8; 3] = [10, 80, 180];

/// Uniformly colored BGR image.
pub(crate) fn uniform_bgr(width: u32, height: u32, bgr: [u8; 3]) -> BgrImage {
    BgrImage::from_pixel(width, height, image::Rgb(bgr))
}

/// Paint an axis-aligned rectangle (clipped to the image) with one pixel value.
pub(crate) fn fill_rect<P: Pixel>(
    image: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    x0: u32,
    y0: u32,
    w: u32,
    h: u32,
    pixel: P,
) {
    let (iw, ih) = image.dimensions();
    for y in y0..(y0 + h).min(ih) {
        for x in x0..(x0 + w).min(iw) {
            image.put_pixel(x, y, pixel);
        }
    }
}
