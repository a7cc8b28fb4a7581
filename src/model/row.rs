use serde::{Deserialize, Serialize};

/// A single match from the global blob search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub project_name: Option<String>,
    pub project_url: Option<String>,
    pub file_path: Option<String>,
    pub line_number: Option<u64>,
    pub snippet: Option<String>,
}

/// One row of a vulnerability-scan export, mapped 1:1 to a CPE string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRow {
    pub vendor: String,
    pub product: String,
    pub version: String,
    pub cpe: String,
}
