mod cli;
mod csv_file;
mod json;

pub use cli::{print_cpe_table, print_extract_table, print_search_table};
pub use csv_file::write_csv;
pub use json::{print_json, write_json};

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

/// Output format for stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format for programmatic use
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'table' or 'json'", s)),
        }
    }
}

/// Writes the JSON and CSV artifact pair for a record set.
pub fn write_artifacts<T: Serialize>(
    json_path: &Path,
    csv_path: &Path,
    records: &[T],
) -> Result<()> {
    write_json(json_path, records)?;
    info!(path = %json_path.display(), "JSON saved");
    write_csv(csv_path, records)?;
    info!(path = %csv_path.display(), "CSV saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_known_formats() {
        assert_eq!(OutputFormat::from_str("table"), Ok(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("JSON"), Ok(OutputFormat::Json));
        assert!(OutputFormat::from_str("sarif").is_err());
    }
}
