//! Calibrated HSV bounds per band color, classification, and representative
//! colors for rendering.
//!
//! The bound values are calibration data; changing any of them changes
//! detection results. Red wraps around the hue axis and is defined by two
//! disjoint ranges. Gold and Silver have no calibrated bounds and always
//! classify as [`ColorName::Unknown`].

use crate::color::ColorName;
use crate::hsv::Hsv;

/// Inclusive lower/upper HSV bound pair.
#[derive(Debug, Clone, Copy)]
pub struct ColorBound {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl ColorBound {
    const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// True when every channel of `sample` lies inside the bound.
    pub fn contains(&self, sample: Hsv) -> bool {
        sample.h >= self.lower.h
            && sample.h <= self.upper.h
            && sample.s >= self.lower.s
            && sample.s <= self.upper.s
            && sample.v >= self.lower.v
            && sample.v <= self.upper.v
    }

    /// Arithmetic per-channel midpoint of the bound pair.
    fn midpoint(&self) -> Hsv {
        Hsv::new(
            ((self.lower.h as u16 + self.upper.h as u16) / 2) as u8,
            ((self.lower.s as u16 + self.upper.s as u16) / 2) as u8,
            ((self.lower.v as u16 + self.upper.v as u16) / 2) as u8,
        )
    }
}

pub(crate) const RED1: ColorBound = ColorBound::new(Hsv::new(0, 65, 100), Hsv::new(6, 250, 150));
pub(crate) const RED2: ColorBound = ColorBound::new(Hsv::new(166, 65, 50), Hsv::new(180, 250, 150));
pub(crate) const ORANGE: ColorBound =
    ColorBound::new(Hsv::new(7, 150, 150), Hsv::new(18, 250, 250));
pub(crate) const YELLOW: ColorBound =
    ColorBound::new(Hsv::new(25, 130, 100), Hsv::new(34, 250, 160));
pub(crate) const GREEN: ColorBound = ColorBound::new(Hsv::new(35, 60, 60), Hsv::new(75, 250, 150));
pub(crate) const BLUE: ColorBound = ColorBound::new(Hsv::new(82, 60, 49), Hsv::new(128, 255, 255));
pub(crate) const VIOLET: ColorBound =
    ColorBound::new(Hsv::new(129, 60, 50), Hsv::new(165, 250, 150));
pub(crate) const BLACK: ColorBound = ColorBound::new(Hsv::new(0, 0, 0), Hsv::new(180, 250, 40));
pub(crate) const BROWN: ColorBound = ColorBound::new(Hsv::new(0, 31, 41), Hsv::new(25, 250, 99));
pub(crate) const GREY: ColorBound = ColorBound::new(Hsv::new(0, 0, 41), Hsv::new(180, 30, 130));
pub(crate) const WHITE: ColorBound = ColorBound::new(Hsv::new(0, 0, 150), Hsv::new(180, 30, 255));

/// Classification priority order. The first matching entry wins; any later
/// match is reported as a calibration overlap but does not change the result.
const CLASSIFY_ORDER: [(ColorName, &[ColorBound]); 10] = [
    (ColorName::Red, &[RED1, RED2]),
    (ColorName::Orange, &[ORANGE]),
    (ColorName::Yellow, &[YELLOW]),
    (ColorName::Green, &[GREEN]),
    (ColorName::Blue, &[BLUE]),
    (ColorName::Violet, &[VIOLET]),
    (ColorName::Brown, &[BROWN]),
    (ColorName::Black, &[BLACK]),
    (ColorName::Grey, &[GREY]),
    (ColorName::White, &[WHITE]),
];

/// The bound ranges used to threshold one color, in digit order
/// (Black=0 .. White=9). Red contributes both of its hue ranges.
pub(crate) fn bounds_for(name: ColorName) -> &'static [ColorBound] {
    match name {
        ColorName::Black => &[BLACK],
        ColorName::Brown => &[BROWN],
        ColorName::Red => &[RED1, RED2],
        ColorName::Orange => &[ORANGE],
        ColorName::Yellow => &[YELLOW],
        ColorName::Green => &[GREEN],
        ColorName::Blue => &[BLUE],
        ColorName::Violet => &[VIOLET],
        ColorName::Grey => &[GREY],
        ColorName::White => &[WHITE],
        ColorName::Unknown => &[],
    }
}

/// Classify one HSV sample against the calibrated bound table.
///
/// Bounds are tested in a fixed priority order and the first match wins. A
/// sample matching no bound classifies as [`ColorName::Unknown`]. Samples
/// matching more than one bound indicate overlapping calibration ranges and
/// are logged as warnings.
pub fn classify(sample: Hsv) -> ColorName {
    let mut assigned = ColorName::Unknown;

    for (name, bounds) in CLASSIFY_ORDER {
        if bounds.iter().any(|b| b.contains(sample)) {
            if assigned == ColorName::Unknown {
                assigned = name;
            } else {
                tracing::warn!(
                    "overlapping color bound definitions ({assigned} and {name}) \
                     for sample h={} s={} v={}",
                    sample.h,
                    sample.s,
                    sample.v
                );
            }
        }
    }

    assigned
}

/// The HSV color used to render a classified name in step-trace snapshots.
///
/// Midpoint of the color's bound pair; Red uses its first hue range. White
/// pairs its own upper bound with Black's lower bound, an inherited asymmetry
/// kept for snapshot fidelity. Unknown renders as black.
pub fn representative_color(name: ColorName) -> Hsv {
    match name {
        ColorName::Black => BLACK.midpoint(),
        ColorName::Brown => BROWN.midpoint(),
        ColorName::Red => RED1.midpoint(),
        ColorName::Orange => ORANGE.midpoint(),
        ColorName::Yellow => YELLOW.midpoint(),
        ColorName::Green => GREEN.midpoint(),
        ColorName::Blue => BLUE.midpoint(),
        ColorName::Violet => VIOLET.midpoint(),
        ColorName::Grey => GREY.midpoint(),
        ColorName::White => ColorBound::new(BLACK.lower, WHITE.upper).midpoint(),
        ColorName::Unknown => Hsv::new(0, 0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representatives_classify_to_their_own_name() {
        // White is excluded: its representative inherits Black's lower bound
        // and lands inside the Grey range (checked separately below).
        for name in ColorName::CALIBRATED {
            if name == ColorName::White {
                continue;
            }
            assert_eq!(classify(representative_color(name)), name, "{name}");
        }
    }

    #[test]
    fn both_red_ranges_classify_as_red() {
        assert_eq!(classify(RED1.midpoint()), ColorName::Red);
        assert_eq!(classify(RED2.midpoint()), ColorName::Red);
    }

    #[test]
    fn representative_round_trip_is_stable() {
        for name in ColorName::CALIBRATED {
            if name == ColorName::White {
                continue;
            }
            let rep = representative_color(name);
            assert_eq!(representative_color(classify(rep)), rep, "{name}");
        }
    }

    #[test]
    fn white_representative_inherits_black_lower_bound() {
        let rep = representative_color(ColorName::White);
        assert_eq!(rep, Hsv::new(90, 15, 127));
        // The inherited midpoint falls inside the Grey bound, which precedes
        // White in the priority order.
        assert_eq!(classify(rep), ColorName::Grey);
    }

    #[test]
    fn out_of_table_sample_is_unknown() {
        // High value, moderate saturation, hue between orange and yellow:
        // no calibrated bound covers this.
        assert_eq!(classify(Hsv::new(20, 40, 255)), ColorName::Unknown);
    }

    #[test]
    fn pure_dark_sample_is_black() {
        assert_eq!(classify(Hsv::new(0, 0, 0)), ColorName::Black);
    }

    #[test]
    fn priority_order_breaks_overlaps_first_match_wins() {
        // V=45, S=40, H=10 sits inside Brown only; nudge into the
        // Brown/Black border: V=40 is Black's ceiling and below Brown's floor.
        assert_eq!(classify(Hsv::new(10, 40, 40)), ColorName::Black);
        assert_eq!(classify(Hsv::new(10, 40, 41)), ColorName::Brown);
    }

    #[test]
    fn unknown_has_no_bounds() {
        assert!(bounds_for(ColorName::Unknown).is_empty());
    }
}
