//! Vulnerability-scan CSV to CPE conversion.
//!
//! Reads a scan export with `Vendor`, `Software`, and `Version` columns and
//! maps each row to a sanitized CPE 2.3 string. Rows are independent; a
//! missing column defaults every row's field to `unknown`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::identifier::build_cpe;
use crate::model::ScanRow;

#[derive(Deserialize)]
struct InputRow {
    #[serde(rename = "Vendor")]
    vendor: Option<String>,
    #[serde(rename = "Software")]
    software: Option<String>,
    #[serde(rename = "Version")]
    version: Option<String>,
}

/// Converts scan rows from any CSV source.
pub fn convert_reader<R: Read>(reader: R) -> Result<Vec<ScanRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize() {
        let input: InputRow = record.context("failed to read scan CSV row")?;
        let vendor = input.vendor.unwrap_or_else(|| "unknown".to_string());
        let product = input.software.unwrap_or_else(|| "unknown".to_string());
        let version = input.version.unwrap_or_else(|| "unknown".to_string());

        let cpe = build_cpe(&vendor, &product, &version);
        rows.push(ScanRow {
            vendor,
            product,
            version,
            cpe,
        });
    }

    Ok(rows)
}

/// Converts a scan CSV file on disk.
pub fn convert_file(path: &Path) -> Result<Vec<ScanRow>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open scan CSV: {}", path.display()))?;
    convert_reader(file)
}
