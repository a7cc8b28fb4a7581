use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifier;

/// Version string used when a manifest omits the version.
pub const UNKNOWN_VERSION: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Pypi,
    Npm,
    Maven,
}

impl Ecosystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Pypi => "pypi",
            Ecosystem::Npm => "npm",
            Ecosystem::Maven => "maven",
        }
    }

    /// The Package URL type prefix for this ecosystem.
    pub fn purl_type(&self) -> &'static str {
        // The three ecosystems happen to share their purl type with
        // their serialized name.
        self.as_str()
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single dependency extracted from a manifest, enriched with its
/// standardized identifiers.
///
/// Records are created by a parser, enriched once, and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Library name (for Maven, `groupId:artifactId`).
    pub name: String,
    /// Free-form version string, or `"unknown"` when the manifest omits it.
    pub version: String,
    #[serde(rename = "type")]
    pub ecosystem: Ecosystem,
    /// Package URL, e.g. `pkg:npm/left-pad@1.0.0`.
    pub purl: String,
    /// Best-effort CPE 2.3 string.
    pub cpe: String,
}

impl DependencyRecord {
    /// Builds a record from raw manifest data, deriving purl and CPE.
    pub fn new(name: impl Into<String>, version: impl Into<String>, ecosystem: Ecosystem) -> Self {
        let name = name.into();
        let version = version.into();
        let purl = identifier::make_purl(ecosystem, &name, &version);
        let cpe = identifier::dependency_cpe(&name, &version);
        Self {
            name,
            version,
            ecosystem,
            purl,
            cpe,
        }
    }
}

/// A [`DependencyRecord`] tagged with the project it came from.
///
/// This is the record shape both output artifacts carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDependency {
    pub project: String,
    pub project_url: String,
    pub library: String,
    pub version: String,
    #[serde(rename = "type")]
    pub ecosystem: Ecosystem,
    pub purl: String,
    pub cpe: String,
}

impl ProjectDependency {
    pub fn new(project: &str, project_url: &str, record: DependencyRecord) -> Self {
        Self {
            project: project.to_string(),
            project_url: project_url.to_string(),
            library: record.name,
            version: record.version,
            ecosystem: record.ecosystem,
            purl: record.purl,
            cpe: record.cpe,
        }
    }
}

/// Complete results of an extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResult {
    pub scan_time: DateTime<Utc>,
    pub project_count: usize,
    pub records: Vec<ProjectDependency>,
}

impl ExtractResult {
    pub fn new(project_count: usize, records: Vec<ProjectDependency>) -> Self {
        Self {
            scan_time: Utc::now(),
            project_count,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecosystem_as_str() {
        assert_eq!(Ecosystem::Pypi.as_str(), "pypi");
        assert_eq!(Ecosystem::Npm.as_str(), "npm");
        assert_eq!(Ecosystem::Maven.as_str(), "maven");
    }

    #[test]
    fn record_derives_identifiers() {
        let record = DependencyRecord::new("left-pad", "1.0.0", Ecosystem::Npm);
        assert_eq!(record.purl, "pkg:npm/left-pad@1.0.0");
        assert!(record.cpe.starts_with("cpe:2.3:a:left-pad:left-pad:1.0.0:"));
    }

    #[test]
    fn record_serializes_type_field() {
        let record = DependencyRecord::new("requests", "2.31.0", Ecosystem::Pypi);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "pypi");
        assert_eq!(json["name"], "requests");
    }

    #[test]
    fn project_dependency_carries_provenance() {
        let record = DependencyRecord::new("lodash", "4.17.21", Ecosystem::Npm);
        let dep = ProjectDependency::new("my-app", "https://gitlab.com/acme/my-app", record);
        assert_eq!(dep.project, "my-app");
        assert_eq!(dep.library, "lodash");
        assert_eq!(dep.purl, "pkg:npm/lodash@4.17.21");
    }
}
