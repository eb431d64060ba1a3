//! Background fitting and subtraction for FTIR absorbance scans.
//!
//! Given a scan of wavenumber/absorbance samples, a background window, an
//! optional exclusion window, and a polynomial order, the engine fits a
//! baseline through the non-peak region by iterative least squares. Points
//! that disagree with the fit by more than their error bars are discarded
//! one worst offender per pass until the remaining points all sit within
//! error. The fitted curve is then subtracted from the raw data to measure
//! the net peak height.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ftir_baseline::{measure_peak, presets, scan::loader};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut scan = loader::load_file(Path::new("scan.csv"))?;
//! scan.apply_preset(&presets::H2O_3500);
//!
//! let fit = scan.fit()?;
//! let peak = measure_peak(&scan, &fit)?;
//! println!("peak height: {}", peak.peak_height);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fit;
pub mod measure;
pub mod presets;
pub mod scan;

pub use error::{Error, Result};
pub use fit::engine::FitResult;
pub use fit::poly::Polynomial;
pub use measure::{measure_peak, PeakMeasurement};
pub use scan::model::{Sample, Scan, UncertaintyModel};
