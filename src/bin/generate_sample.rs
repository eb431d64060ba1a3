//! Writes a synthetic FTIR absorbance scan to `sample_scan.csv`.
//!
//! The scan carries a gently sloping baseline, a broad water band, a
//! carbonate doublet, and seeded Gaussian noise, so the background fitter
//! has something realistic to chew on.

use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Wavenumbers: 4000 → 400, step 2, descending as spectrometers export.
    let wavenumbers: Vec<f64> = (0..=1800).map(|i| 4000.0 - f64::from(i) * 2.0).collect();

    // (center, width, amplitude)
    let bands = [
        (3450.0, 120.0, 0.85), // broad H2O stretch
        (1515.0, 55.0, 0.35),  // carbonate doublet, high side
        (1430.0, 60.0, 0.40),  // carbonate doublet, low side
    ];

    let output_path = "sample_scan.csv";
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    for &wn in &wavenumbers {
        let baseline = 0.15 + (4000.0 - wn) * 2.0e-5;
        let signal: f64 = bands
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(wn, mu, sigma, amp))
            .sum();
        let y = baseline + signal + rng.gauss(0.0, 0.004);
        writer.write_record(&[format!("{wn:.1}"), format!("{y:.6}")])?;
    }
    writer.flush()?;

    println!(
        "Wrote {} samples to {output_path}",
        wavenumbers.len()
    );
    Ok(())
}
