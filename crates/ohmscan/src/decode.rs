//! Band-sequence to resistance decoding.

use crate::config::BandCountMode;
use crate::{BandInfo, UNDETERMINED_RESISTANCE};

/// Decode an ordered band list into a resistance in ohms.
///
/// Four-band: digit, digit, multiplier, tolerance (ignored).
/// Five-band: digit, digit, digit, multiplier, tolerance (ignored).
/// When the band count does not match the configured mode but at least three
/// bands are present, the four-band formula is applied to the first three.
/// Fewer than three bands is the undetermined outcome (-1).
pub(crate) fn decode_bands(bands: &[BandInfo], mode: BandCountMode) -> i64 {
    match (mode, bands.len()) {
        (BandCountMode::Four, 4) => four_band(bands),
        (BandCountMode::Five, 5) => five_band(bands),
        (_, n) if n >= 3 => four_band(bands),
        _ => UNDETERMINED_RESISTANCE,
    }
}

fn four_band(bands: &[BandInfo]) -> i64 {
    let (Some(d1), Some(d2), Some(mult)) = (
        bands[0].color.digit(),
        bands[1].color.digit(),
        bands[2].color.digit(),
    ) else {
        return UNDETERMINED_RESISTANCE;
    };
    (d1 * 10 + d2) * 10i64.pow(mult as u32)
}

fn five_band(bands: &[BandInfo]) -> i64 {
    let (Some(d1), Some(d2), Some(d3), Some(mult)) = (
        bands[0].color.digit(),
        bands[1].color.digit(),
        bands[2].color.digit(),
        bands[3].color.digit(),
    ) else {
        return UNDETERMINED_RESISTANCE;
    };
    (d1 * 100 + d2 * 10 + d3) * 10i64.pow(mult as u32)
}
