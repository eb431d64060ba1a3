use serde::Serialize;

use crate::error::{Error, Result};
use crate::fit::engine::FitResult;
use crate::scan::model::{Sample, Scan};

// ---------------------------------------------------------------------------
// PeakMeasurement – subtracted spectrum + scalar peak height
// ---------------------------------------------------------------------------

/// The background-subtracted spectrum over the background span, plus the
/// scalar peak height.
#[derive(Debug, Clone, Serialize)]
pub struct PeakMeasurement {
    /// Wavenumbers of the measured span.
    pub x: Vec<f64>,
    /// Absorbance minus the fitted background, per wavenumber.
    pub subtracted: Vec<f64>,
    /// Maximum subtracted absorbance, rounded to 5 decimal digits for
    /// display stability.
    pub peak_height: f64,
}

/// Subtract the fitted background and measure the net peak height.
///
/// The measured span runs between the sample nearest to the lower
/// background bound and the sample nearest to the upper one (by absolute x
/// distance), inclusive. No iteration happens here; the only failure is an
/// empty scan.
pub fn measure_peak(scan: &Scan, fit: &FitResult) -> Result<PeakMeasurement> {
    let samples = scan.samples();
    let (low, high) = scan.background_range();
    if samples.is_empty() {
        return Err(Error::EmptyRange { low, high });
    }

    let at_low = nearest_index(samples, low);
    let at_high = nearest_index(samples, high);
    let (start, end) = (at_low.min(at_high), at_low.max(at_high));

    let mut x = Vec::with_capacity(end - start + 1);
    let mut subtracted = Vec::with_capacity(end - start + 1);
    for s in &samples[start..=end] {
        x.push(s.x);
        subtracted.push(s.y - fit.evaluate(s.x));
    }

    let peak = subtracted.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(PeakMeasurement {
        x,
        subtracted,
        peak_height: round_to(peak, 5),
    })
}

/// Index of the sample closest to `target` in x; first winner on ties.
fn nearest_index(samples: &[Sample], target: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, s) in samples.iter().enumerate() {
        let dist = (s.x - target).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}
