//! Command-line background subtraction.
//!
//! Usage: `subtract <scan.csv|scan.json> [preset]`
//!
//! Fits the background with the named preset (default `3500`), prints the
//! peak height, and writes the subtracted spectrum next to the input as
//! `<stem>_subtracted.csv`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

use ftir_baseline::{measure_peak, presets, scan::loader, PeakMeasurement};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        bail!("usage: subtract <scan.csv|scan.json> [preset]");
    };
    let preset_name = args.next().unwrap_or_else(|| "3500".to_string());

    let preset = presets::all()
        .iter()
        .find(|p| p.name == preset_name)
        .with_context(|| {
            format!(
                "unknown preset {preset_name:?} (available: {})",
                preset_names()
            )
        })?;

    let path = PathBuf::from(&input);
    let mut scan = loader::load_file(&path).with_context(|| format!("loading {input}"))?;
    info!("loaded {} samples from {input}", scan.samples().len());
    scan.apply_preset(preset);

    let fit = scan.fit().context("background fit failed")?;
    info!(
        "fit used {} points, rejected {}",
        fit.used_indices().len(),
        fit.rejected().len()
    );
    for s in fit.rejected() {
        info!("  rejected outlier at x = {:.2}, y = {:.5}", s.x, s.y);
    }

    let peak = measure_peak(&scan, &fit)?;
    println!("peak height ({}): {}", preset.name, peak.peak_height);

    let out_path = subtracted_path(&path);
    write_subtracted(&out_path, &peak)
        .with_context(|| format!("writing {}", out_path.display()))?;
    println!("subtracted spectrum written to {}", out_path.display());
    Ok(())
}

fn preset_names() -> String {
    presets::all()
        .iter()
        .map(|p| p.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn subtracted_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scan");
    input.with_file_name(format!("{stem}_subtracted.csv"))
}

fn write_subtracted(path: &Path, peak: &PeakMeasurement) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    for (x, y) in peak.x.iter().zip(&peak.subtracted) {
        writer.write_record(&[format!("{x:.1}"), format!("{y:.6}")])?;
    }
    writer.flush()?;
    Ok(())
}
