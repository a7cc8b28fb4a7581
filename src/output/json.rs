use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

pub fn write_json<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn print_json<T: Serialize>(records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependencyRecord, Ecosystem};

    #[test]
    fn writes_pretty_printed_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let records = vec![DependencyRecord::new("left-pad", "1.0.0", Ecosystem::Npm)];

        write_json(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('['));
        assert!(content.contains("\"pkg:npm/left-pad@1.0.0\""));
        // Pretty-printed, one field per line.
        assert!(content.lines().count() > 3);
    }
}
