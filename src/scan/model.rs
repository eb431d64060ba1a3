use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fit::engine::{self, FitResult};
use crate::presets::BandPreset;

// ---------------------------------------------------------------------------
// Sample – one measurement
// ---------------------------------------------------------------------------

/// A single measurement: wavenumber, absorbance, and per-point uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Wavenumber (x axis).
    pub x: f64,
    /// Absorbance (y axis).
    pub y: f64,
    /// Absolute wavenumber uncertainty (x ± x_err).
    pub x_err: f64,
    /// Absolute absorbance uncertainty (y ± y_err).
    pub y_err: f64,
}

// ---------------------------------------------------------------------------
// UncertaintyModel – default per-point errors
// ---------------------------------------------------------------------------

/// Per-point uncertainty assigned when a scan is built from bare (x, y) rows.
///
/// The defaults are working assumptions, not calibrated instrument
/// figures: a constant wavenumber error and an absorbance error of 5% of
/// the signal magnitude. Override them when the spectrometer's actual
/// error budget is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyModel {
    /// Constant absolute wavenumber error per point.
    pub x_err: f64,
    /// Absolute absorbance error as a fraction of |y|.
    pub y_err_fraction: f64,
}

impl Default for UncertaintyModel {
    fn default() -> Self {
        Self {
            x_err: 5.0,
            y_err_fraction: 0.05,
        }
    }
}

impl UncertaintyModel {
    /// Build a sample from one (x, y) pair.
    pub fn sample(&self, x: f64, y: f64) -> Sample {
        Sample {
            x,
            y,
            x_err: self.x_err,
            y_err: (y * self.y_err_fraction).abs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scan – samples plus mutable fitting configuration
// ---------------------------------------------------------------------------

/// A loaded scan and its current fitting configuration.
///
/// Samples are fixed at construction and kept in acquisition order (x is
/// typically monotonic but nothing here assumes it). The range and order
/// fields are adjusted between calls to [`Scan::fit`], which reads them and
/// returns a fresh [`FitResult`] each time; nothing is cached across calls.
#[derive(Debug, Clone)]
pub struct Scan {
    samples: Vec<Sample>,
    /// Background window (low ≤ high).
    background: (f64, f64),
    /// Exclusion window inside the background (low ≤ high).
    exclusion: (f64, f64),
    fit_order: usize,
    outlier_tolerance_factor: f64,
}

impl Scan {
    /// Build a scan from fully specified samples.
    ///
    /// The background window defaults to the whole x span and the exclusion
    /// window to a degenerate interval at the median x, which excludes
    /// nothing.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let background = x_span(&samples).unwrap_or((0.0, 0.0));
        let mid = median_x(&samples);
        Scan {
            samples,
            background,
            exclusion: (mid, mid),
            fit_order: 1,
            outlier_tolerance_factor: 1.0,
        }
    }

    /// Build a scan from (wavenumber, absorbance) pairs, assigning each
    /// point the uncertainty given by `model`.
    pub fn from_pairs(pairs: &[(f64, f64)], model: &UncertaintyModel) -> Self {
        Self::from_samples(pairs.iter().map(|&(x, y)| model.sample(x, y)).collect())
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Current background window as (low, high).
    pub fn background_range(&self) -> (f64, f64) {
        self.background
    }

    /// Current exclusion window as (low, high).
    pub fn exclusion_range(&self) -> (f64, f64) {
        self.exclusion
    }

    pub fn fit_order(&self) -> usize {
        self.fit_order
    }

    pub fn outlier_tolerance_factor(&self) -> f64 {
        self.outlier_tolerance_factor
    }

    /// Set the background window. Bounds may come in either order; they are
    /// stored as (min, max).
    pub fn set_background_range(&mut self, a: f64, b: f64) -> Result<()> {
        self.background = normalized(a, b, "background")?;
        Ok(())
    }

    /// Set the exclusion window. Bounds may come in either order; they are
    /// stored as (min, max).
    pub fn set_exclusion_range(&mut self, a: f64, b: f64) -> Result<()> {
        self.exclusion = normalized(a, b, "exclusion")?;
        Ok(())
    }

    /// Set the polynomial degree of the background fit.
    pub fn set_fit_order(&mut self, order: usize) {
        self.fit_order = order;
    }

    /// Set the multiplier applied to each point's y error when deciding
    /// whether a residual disqualifies the point. Must be finite and > 0.
    pub fn set_outlier_tolerance_factor(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::Config(format!(
                "outlier tolerance factor must be positive and finite, got {factor}"
            )));
        }
        self.outlier_tolerance_factor = factor;
        Ok(())
    }

    /// Install a published band preset: background window, exclusion window,
    /// and fit order in one step.
    pub fn apply_preset(&mut self, preset: &BandPreset) {
        self.background = preset.background;
        self.exclusion = preset.exclusion;
        self.fit_order = preset.fit_order;
    }

    /// Fit the background polynomial under the current configuration.
    ///
    /// See [`engine::fit_background`] for the algorithm and error cases.
    pub fn fit(&self) -> Result<FitResult> {
        engine::fit_background(self)
    }
}

fn normalized(a: f64, b: f64, what: &str) -> Result<(f64, f64)> {
    if !a.is_finite() || !b.is_finite() {
        return Err(Error::Config(format!(
            "{what} bounds must be finite, got ({a}, {b})"
        )));
    }
    Ok((a.min(b), a.max(b)))
}

/// Min and max of the sample x values, or None for an empty scan.
pub(crate) fn x_span(samples: &[Sample]) -> Option<(f64, f64)> {
    if samples.is_empty() {
        return None;
    }
    let min = samples.iter().map(|s| s.x).fold(f64::INFINITY, f64::min);
    let max = samples
        .iter()
        .map(|s| s.x)
        .fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// Median of the sample x values (mean of the middle pair for even counts);
/// 0.0 for an empty scan.
fn median_x(samples: &[Sample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut xs: Vec<f64> = samples.iter().map(|s| s.x).collect();
    xs.sort_by(f64::total_cmp);
    let mid = xs.len() / 2;
    if xs.len() % 2 == 1 {
        xs[mid]
    } else {
        (xs[mid - 1] + xs[mid]) / 2.0
    }
}
