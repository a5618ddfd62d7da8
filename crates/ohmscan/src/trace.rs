//! Step-trace records: observational diagnostics collected along the
//! pipeline. Records never influence the decoded value.

use image::GrayImage;
use serde::Serialize;

use crate::hsv::BgrImage;

/// One recorded detection step: a label and an optional BGR snapshot of the
/// intermediate image at that point.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub label: String,
    /// Display snapshot; not serialized.
    #[serde(skip)]
    pub snapshot: Option<BgrImage>,
}

impl StepRecord {
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }
}

/// Collector for step records with a verbosity gate: stage-boundary records
/// are always kept, fine-grained ones only when verbose tracing is enabled.
#[derive(Debug)]
pub(crate) struct StepTrace {
    records: Vec<StepRecord>,
    verbose: bool,
}

impl StepTrace {
    pub fn new(verbose: bool) -> Self {
        Self {
            records: Vec::new(),
            verbose,
        }
    }

    pub fn record(&mut self, label: impl Into<String>, snapshot: Option<BgrImage>) {
        self.records.push(StepRecord {
            label: label.into(),
            snapshot,
        });
    }

    /// Record only when verbose tracing is on. The snapshot closure is not
    /// evaluated otherwise.
    pub fn record_verbose(&mut self, label: &str, snapshot: impl FnOnce() -> BgrImage) {
        if self.verbose {
            self.record(label, Some(snapshot()));
        }
    }

    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
    }
}

/// Render a binary mask as a BGR snapshot (white foreground on black).
pub(crate) fn mask_snapshot(mask: &GrayImage) -> BgrImage {
    let (w, h) = mask.dimensions();
    let mut out = BgrImage::new(w, h);
    for (x, y, px) in mask.enumerate_pixels() {
        let v = px[0];
        out.put_pixel(x, y, image::Rgb([v, v, v]));
    }
    out
}
