use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A dense monomial polynomial, coefficients stored in ascending degree
/// order (`coeffs[k]` multiplies `x^k`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Build a polynomial from coefficients in ascending degree order.
    pub fn new(coeffs: Vec<f64>) -> Self {
        Polynomial { coeffs }
    }

    /// Ordinary least-squares fit of a degree-`degree` polynomial to the
    /// given points.
    ///
    /// Builds the Vandermonde matrix and solves it with an SVD using the
    /// conventional `eps · max(rows, cols) · σ_max` singular-value cutoff,
    /// so the coefficients agree with a standard polynomial least-squares
    /// solver up to floating-point order-of-operations. Degree 0 reduces to
    /// the mean of `ys`.
    ///
    /// Requires strictly more points than `degree`; fewer points make the
    /// regression underdetermined.
    pub fn least_squares(xs: &[f64], ys: &[f64], degree: usize) -> Result<Self> {
        debug_assert_eq!(xs.len(), ys.len());
        if xs.len() <= degree {
            return Err(Error::Underdetermined {
                order: degree,
                remaining: xs.len(),
            });
        }

        let rows = xs.len();
        let cols = degree + 1;
        let mut vandermonde = DMatrix::zeros(rows, cols);
        for (i, &x) in xs.iter().enumerate() {
            let mut term = 1.0;
            for j in 0..cols {
                vandermonde[(i, j)] = term;
                term *= x;
            }
        }
        let rhs = DVector::from_column_slice(ys);

        let svd = vandermonde.svd(true, true);
        let cutoff = f64::EPSILON * rows.max(cols) as f64 * svd.singular_values.max();
        let solution = svd.solve(&rhs, cutoff).map_err(Error::Algebra)?;

        if solution.iter().any(|c| c.is_nan()) {
            return Err(Error::Algebra("NaN in fitted coefficients"));
        }

        Ok(Polynomial {
            coeffs: solution.iter().copied().collect(),
        })
    }

    /// Evaluate the polynomial at `x` (Horner's scheme).
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Coefficients in ascending degree order.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }
}
