//! Resistor band color names and their digit values.

use serde::{Deserialize, Serialize};

/// Name of a resistor band color.
///
/// `Unknown` is used for samples that fall outside every calibrated bound.
/// Gold and Silver tolerance rings have no calibrated bounds yet and
/// therefore classify as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Grey,
    White,
    Unknown,
}

impl ColorName {
    /// All calibrated names, in digit order (Black=0 .. White=9).
    pub const CALIBRATED: [ColorName; 10] = [
        ColorName::Black,
        ColorName::Brown,
        ColorName::Red,
        ColorName::Orange,
        ColorName::Yellow,
        ColorName::Green,
        ColorName::Blue,
        ColorName::Violet,
        ColorName::Grey,
        ColorName::White,
    ];

    /// The digit this band color encodes, or `None` for `Unknown`.
    pub fn digit(self) -> Option<i64> {
        match self {
            ColorName::Black => Some(0),
            ColorName::Brown => Some(1),
            ColorName::Red => Some(2),
            ColorName::Orange => Some(3),
            ColorName::Yellow => Some(4),
            ColorName::Green => Some(5),
            ColorName::Blue => Some(6),
            ColorName::Violet => Some(7),
            ColorName::Grey => Some(8),
            ColorName::White => Some(9),
            ColorName::Unknown => None,
        }
    }

    /// Lowercase display name, used in step-trace labels and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorName::Black => "black",
            ColorName::Brown => "brown",
            ColorName::Red => "red",
            ColorName::Orange => "orange",
            ColorName::Yellow => "yellow",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
            ColorName::Violet => "violet",
            ColorName::Grey => "grey",
            ColorName::White => "white",
            ColorName::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ColorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_follow_the_standard_code() {
        for (i, name) in ColorName::CALIBRATED.iter().enumerate() {
            assert_eq!(name.digit(), Some(i as i64));
        }
        assert_eq!(ColorName::Unknown.digit(), None);
    }
}
