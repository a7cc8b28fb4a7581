use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Writes records as CSV with a header row taken from the record's serde
/// field names.
pub fn write_csv<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV file: {}", path.display()))?;

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScanRow;
    use std::fs;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![ScanRow {
            vendor: "acme".to_string(),
            product: "widget".to_string(),
            version: "1.0".to_string(),
            cpe: "cpe:2.3:a:acme:widget:1.0:*:*:*:*:*:*:*".to_string(),
        }];

        write_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("vendor,product,version,cpe"));
        assert_eq!(
            lines.next(),
            Some("acme,widget,1.0,cpe:2.3:a:acme:widget:1.0:*:*:*:*:*:*:*")
        );
    }
}
