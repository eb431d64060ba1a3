use thiserror::Error;

/// Errors reported by the scan loaders and the fitting engine.
///
/// Every variant is terminal: the engine never retries internally and a
/// failed fit leaves the scan's samples and configuration untouched, so the
/// caller is free to adjust the ranges or order and fit again.
#[derive(Debug, Error)]
pub enum Error {
    /// A range or tolerance value that cannot be normalized.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Too few retained background points for the requested polynomial
    /// order; pruning further would make the regression underdetermined.
    #[error(
        "underdetermined fit: {remaining} candidate points left for a degree-{order} polynomial"
    )]
    Underdetermined { order: usize, remaining: usize },

    /// The background or measurement range spans zero samples.
    #[error("range [{low}, {high}] selects no samples")]
    EmptyRange { low: f64, high: f64 },

    /// A malformed row in scan input data.
    #[error("row {row}: {reason}")]
    Parse { row: usize, reason: String },

    /// The linear solver could not produce finite coefficients.
    #[error("linear algebra failure: {0}")]
    Algebra(&'static str),

    #[error("unable to read scan file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
