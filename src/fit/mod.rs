/// Fitting layer: background point selection and the iterative tolerant
/// least-squares fitter.
///
/// `mask` picks the candidate points inside the background window,
/// `poly` does one least-squares polynomial regression, and `engine`
/// drives the fit/prune loop that discards outliers one at a time.

pub mod engine;
pub mod mask;
pub mod poly;
