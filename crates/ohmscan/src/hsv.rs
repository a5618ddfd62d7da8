//! HSV color samples and plane conversion.
//!
//! Hue uses the half-degree convention (0..=180) so the calibrated bounds fit
//! an 8-bit channel; saturation and value span the full 0..=255 range. Input
//! buffers are blue-green-red ordered, the convention all masking and
//! classification arithmetic assumes.

use image::{ImageBuffer, Rgb};
use serde::{Deserialize, Serialize};

/// 8-bit three-channel pixel buffer in blue-green-red channel order.
///
/// The `Rgb` container is reused for its storage layout only; channel 0 is
/// blue, channel 2 is red. Callers converting from RGB/RGBA sources must swap
/// channels before invoking the detector.
pub type BgrImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// One HSV color sample, H in 0..=180, S and V in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Convert one BGR pixel to HSV with the half-degree hue convention.
    pub fn from_bgr(b: u8, g: u8, r: u8) -> Self {
        let rf = r as f32 / 255.0;
        let gf = g as f32 / 255.0;
        let bf = b as f32 / 255.0;

        let max = rf.max(gf).max(bf);
        let min = rf.min(gf).min(bf);
        let delta = max - min;

        let h_deg = if delta == 0.0 {
            0.0
        } else if max == rf {
            60.0 * (((gf - bf) / delta) % 6.0)
        } else if max == gf {
            60.0 * (((bf - rf) / delta) + 2.0)
        } else {
            60.0 * (((rf - gf) / delta) + 4.0)
        };
        let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

        let s = if max == 0.0 { 0.0 } else { delta / max };

        Self {
            h: (h_deg / 2.0).round().min(180.0) as u8,
            s: (s * 255.0).round() as u8,
            v: (max * 255.0).round() as u8,
        }
    }

    /// Convert back to a BGR triple, used when rendering step-trace snapshots.
    pub fn to_bgr(self) -> [u8; 3] {
        let h_deg = self.h as f32 * 2.0;
        let s = self.s as f32 / 255.0;
        let v = self.v as f32 / 255.0;

        let c = v * s;
        let x = c * (1.0 - ((h_deg / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (rf, gf, bf) = match h_deg {
            d if d < 60.0 => (c, x, 0.0),
            d if d < 120.0 => (x, c, 0.0),
            d if d < 180.0 => (0.0, c, x),
            d if d < 240.0 => (0.0, x, c),
            d if d < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [
            ((bf + m) * 255.0).round() as u8,
            ((gf + m) * 255.0).round() as u8,
            ((rf + m) * 255.0).round() as u8,
        ]
    }
}

/// Row-major HSV plane converted from a BGR buffer.
#[derive(Debug, Clone)]
pub(crate) struct HsvImage {
    width: u32,
    height: u32,
    data: Vec<Hsv>,
}

impl HsvImage {
    pub fn from_bgr_image(image: &BgrImage) -> Self {
        let (width, height) = image.dimensions();
        let data = image
            .pixels()
            .map(|p| Hsv::from_bgr(p[0], p[1], p[2]))
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Hsv {
        debug_assert!(x < self.width && y < self.height);
        self.data[(y * self.width + x) as usize]
    }

    /// Render the plane back to BGR for display snapshots.
    pub fn to_bgr_image(&self) -> BgrImage {
        let mut out = BgrImage::new(self.width, self.height);
        for (i, px) in self.data.iter().enumerate() {
            let x = i as u32 % self.width;
            let y = i as u32 / self.width;
            out.put_pixel(x, y, image::Rgb(px.to_bgr()));
        }
        out
    }
}
