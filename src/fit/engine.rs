use log::debug;
use serde::Serialize;

use super::mask;
use super::poly::Polynomial;
use crate::error::{Error, Result};
use crate::scan::model::{Sample, Scan};

// ---------------------------------------------------------------------------
// FitResult
// ---------------------------------------------------------------------------

/// Outcome of a background fit: the fitted curve, the samples the final
/// regression used, and every sample discarded on the way there.
#[derive(Debug, Clone, Serialize)]
pub struct FitResult {
    curve: Polynomial,
    used_indices: Vec<usize>,
    rejected: Vec<Sample>,
}

impl FitResult {
    /// Evaluate the fitted background curve at an arbitrary wavenumber.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.curve.evaluate(x)
    }

    pub fn curve(&self) -> &Polynomial {
        &self.curve
    }

    /// Ascending indices into the scan's samples retained by the final fit.
    pub fn used_indices(&self) -> &[usize] {
        &self.used_indices
    }

    /// Samples pruned as outliers, in the order they were removed.
    pub fn rejected(&self) -> &[Sample] {
        &self.rejected
    }
}

// ---------------------------------------------------------------------------
// Iterative tolerant fitter
// ---------------------------------------------------------------------------

/// Fit the background polynomial for the scan's current configuration.
///
/// Runs ordinary least squares over the masked background points, then
/// repeatedly removes the single worst-residual point and refits until
/// every remaining residual sits within the scaled error bars. Residuals
/// are tolerant: the curve is evaluated at both ends of a point's x error
/// band and the smaller distance counts, and distances within
/// `outlier_tolerance_factor · y_err` are treated as zero.
///
/// Errors:
/// * [`Error::EmptyRange`] – the background window selects no samples.
/// * [`Error::Underdetermined`] – too few candidates remain for the
///   requested order while nonzero residuals are still present. The engine
///   stops rather than regress without degrees of freedom.
pub fn fit_background(scan: &Scan) -> Result<FitResult> {
    let samples = scan.samples();
    let (low, high) = scan.background_range();
    let order = scan.fit_order();
    let tolerance_factor = scan.outlier_tolerance_factor();

    let mut candidates =
        mask::background_indices(samples, scan.background_range(), scan.exclusion_range());
    if candidates.is_empty() {
        return Err(Error::EmptyRange { low, high });
    }
    debug!(
        "background fit: {} candidates in [{low}, {high}], order {order}",
        candidates.len()
    );

    let mut rejected: Vec<Sample> = Vec::new();
    loop {
        if candidates.len() <= order {
            return Err(Error::Underdetermined {
                order,
                remaining: candidates.len(),
            });
        }

        let xs: Vec<f64> = candidates.iter().map(|&i| samples[i].x).collect();
        let ys: Vec<f64> = candidates.iter().map(|&i| samples[i].y).collect();
        let curve = Polynomial::least_squares(&xs, &ys, order)?;

        let residuals = tolerant_residuals(samples, &candidates, &curve, tolerance_factor);

        // First maximum wins on ties, so the rejection order is stable.
        let mut worst: Option<(usize, f64)> = None;
        for (slot, &r) in residuals.iter().enumerate() {
            if r > 0.0 && worst.map_or(true, |(_, best)| r > best) {
                worst = Some((slot, r));
            }
        }

        let Some((slot, resid)) = worst else {
            debug!(
                "background fit converged: {} points used, {} rejected",
                candidates.len(),
                rejected.len()
            );
            return Ok(FitResult {
                curve,
                used_indices: candidates,
                rejected,
            });
        };

        // Removing a point must leave enough for the next regression.
        if candidates.len() <= order + 1 {
            return Err(Error::Underdetermined {
                order,
                remaining: candidates.len(),
            });
        }

        let idx = candidates.remove(slot);
        debug!(
            "rejecting sample {idx} at x = {} (residual {resid:.6}); {} candidates left",
            samples[idx].x,
            candidates.len()
        );
        rejected.push(samples[idx]);
    }
}

/// Distance of each candidate from the curve, with tolerance for the
/// point's error bars.
///
/// The curve is evaluated at `x − x_err` and `x + x_err`; the smaller of
/// the two absolute y distances is the point's residual. Residuals no
/// larger than `tolerance_factor · y_err` are set to zero, so a point the
/// curve passes within error never counts as an outlier.
fn tolerant_residuals(
    samples: &[Sample],
    candidates: &[usize],
    curve: &Polynomial,
    tolerance_factor: f64,
) -> Vec<f64> {
    candidates
        .iter()
        .map(|&i| {
            let s = &samples[i];
            let at_low = (s.y - curve.evaluate(s.x - s.x_err)).abs();
            let at_high = (s.y - curve.evaluate(s.x + s.x_err)).abs();
            let resid = at_low.min(at_high);
            if resid <= tolerance_factor * s.y_err {
                0.0
            } else {
                resid
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line_sample(x: f64, y: f64) -> Sample {
        Sample {
            x,
            y,
            x_err: 0.0,
            y_err: 0.1,
        }
    }

    #[test]
    fn residuals_within_error_are_zeroed() {
        let samples: Vec<Sample> = (0..4).map(|i| line_sample(i as f64, i as f64)).collect();
        let candidates: Vec<usize> = (0..4).collect();
        let curve = Polynomial::least_squares(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0, 3.0], 1)
            .unwrap();
        let residuals = tolerant_residuals(&samples, &candidates, &curve, 1.0);
        assert!(residuals.iter().all(|&r| r == 0.0));
    }

    #[test]
    fn x_error_band_takes_the_smaller_distance() {
        // Curve y = x; the point (1, 1.5) with x_err 1 has the curve pass
        // through y = 2 at its upper x bound, 0.5 away instead of 1.5.
        let curve = Polynomial::least_squares(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 2.0, 3.0], 1)
            .unwrap();
        let samples = vec![Sample {
            x: 1.0,
            y: 1.5,
            x_err: 1.0,
            y_err: 0.01,
        }];
        let residuals = tolerant_residuals(&samples, &[0], &curve, 1.0);
        assert_abs_diff_eq!(residuals[0], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn distance_exactly_at_the_error_bar_is_within_error() {
        let curve = Polynomial::new(vec![3.0]);
        let at_bar = vec![Sample {
            x: 1.0,
            y: 3.125,
            x_err: 0.0,
            y_err: 0.125,
        }];
        assert_eq!(tolerant_residuals(&at_bar, &[0], &curve, 1.0)[0], 0.0);

        let past_bar = vec![Sample {
            x: 1.0,
            y: 3.1251,
            x_err: 0.0,
            y_err: 0.125,
        }];
        assert!(tolerant_residuals(&past_bar, &[0], &curve, 1.0)[0] > 0.0);
    }

    #[test]
    fn factor_scales_the_rejection_threshold() {
        let curve = Polynomial::least_squares(&[0.0, 1.0, 2.0], &[0.0, 0.0, 0.0], 0).unwrap();
        let samples = vec![Sample {
            x: 1.0,
            y: 0.25,
            x_err: 0.0,
            y_err: 0.1,
        }];
        assert!(tolerant_residuals(&samples, &[0], &curve, 1.0)[0] > 0.0);
        // With a 3× tolerance the same point is within error.
        assert_eq!(tolerant_residuals(&samples, &[0], &curve, 3.0)[0], 0.0);
    }

    #[test]
    fn empty_background_window_fails_before_fitting() {
        let scan = Scan::from_samples(vec![line_sample(0.0, 0.0), line_sample(10.0, 10.0)]);
        // Whole-span default window is open, so only interior points remain;
        // here there are none.
        let err = scan.fit().unwrap_err();
        assert!(matches!(err, Error::EmptyRange { .. }));
    }
}
