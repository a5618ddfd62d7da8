//! Strategy dispatch and shared input validation.
//!
//! Both strategies are stateless single passes: validate, run to completion,
//! return a fully-built result. Algorithmic stages live in `columns` and
//! `contours`; this layer only owns the call boundary.

mod columns;
mod contours;

use crate::config::{DetectConfig, StrategyKind};
use crate::error::DetectError;
use crate::hsv::BgrImage;
use crate::DetectionResult;

pub(crate) fn detect(
    image: &BgrImage,
    config: &DetectConfig,
) -> Result<DetectionResult, DetectError> {
    validate(image)?;
    let result = match config.strategy {
        StrategyKind::Columns => columns::run(image, config),
        StrategyKind::Contours => contours::run(image, config),
    };
    Ok(result)
}

fn validate(image: &BgrImage) -> Result<(), DetectError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(DetectError::EmptyInput { width, height });
    }
    if height < 2 {
        return Err(DetectError::RegionTooSmall { height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_fails_fast() {
        let img = BgrImage::new(0, 0);
        assert_eq!(
            detect(&img, &DetectConfig::default()).unwrap_err(),
            DetectError::EmptyInput {
                width: 0,
                height: 0
            }
        );
    }

    #[test]
    fn single_row_input_is_too_small() {
        let img = BgrImage::new(10, 1);
        assert_eq!(
            detect(&img, &DetectConfig::default()).unwrap_err(),
            DetectError::RegionTooSmall { height: 1 }
        );
    }
}
