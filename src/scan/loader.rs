use std::path::Path;

use serde::Deserialize;

use super::model::{Scan, UncertaintyModel};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a scan from a file with the default uncertainty model. Dispatch by
/// extension.
///
/// Supported formats:
/// * `.csv` – headerless rows `wavenumber,absorbance[,...]` (the common
///   spectrometer export; extra columns are ignored)
/// * `.json` – `{ "x": [...], "y": [...] }` with equal-length arrays
pub fn load_file(path: &Path) -> Result<Scan> {
    load_file_with(path, &UncertaintyModel::default())
}

/// Same as [`load_file`] but with an explicit uncertainty model.
pub fn load_file_with(path: &Path, model: &UncertaintyModel) -> Result<Scan> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, model),
        "json" => load_json(path, model),
        other => Err(Error::Parse {
            row: 0,
            reason: format!("unsupported file extension: .{other}"),
        }),
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Build a scan from pre-split text rows (external CSV parsing supplies
/// these). Each row must carry at least two numeric fields, wavenumber then
/// absorbance; anything after the first two fields is ignored.
pub fn scan_from_rows<I, R, S>(rows: I, model: &UncertaintyModel) -> Result<Scan>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut pairs = Vec::new();
    for (row, record) in rows.into_iter().enumerate() {
        let fields: Vec<&str> = record.as_ref().iter().map(|f| f.as_ref()).collect();
        pairs.push(parse_row(row, &fields)?);
    }
    Ok(Scan::from_pairs(&pairs, model))
}

fn parse_row(row: usize, fields: &[&str]) -> Result<(f64, f64)> {
    if fields.len() < 2 {
        return Err(Error::Parse {
            row,
            reason: format!("expected at least 2 fields, got {}", fields.len()),
        });
    }
    let x = parse_field(row, "wavenumber", fields[0])?;
    let y = parse_field(row, "absorbance", fields[1])?;
    Ok((x, y))
}

fn parse_field(row: usize, name: &str, token: &str) -> Result<f64> {
    token.trim().parse::<f64>().map_err(|_| Error::Parse {
        row,
        reason: format!("{name} field {token:?} is not a number"),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, model: &UncertaintyModel) -> Result<Scan> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut pairs = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let fields: Vec<&str> = record.iter().collect();
        pairs.push(parse_row(row, &fields)?);
    }
    Ok(Scan::from_pairs(&pairs, model))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct JsonScan {
    x: Vec<f64>,
    y: Vec<f64>,
}

fn load_json(path: &Path, model: &UncertaintyModel) -> Result<Scan> {
    let text = std::fs::read_to_string(path)?;
    let parsed: JsonScan = serde_json::from_str(&text)?;

    if parsed.x.len() != parsed.y.len() {
        return Err(Error::Parse {
            row: 0,
            reason: format!(
                "x has {} values but y has {}",
                parsed.x.len(),
                parsed.y.len()
            ),
        });
    }

    let pairs: Vec<(f64, f64)> = parsed.x.into_iter().zip(parsed.y).collect();
    Ok(Scan::from_pairs(&pairs, model))
}
