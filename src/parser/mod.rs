//! Manifest parsers.
//!
//! This module provides the [`ManifestParser`] trait and one implementation
//! per supported manifest dialect:
//!
//! | Parser | Manifest | Ecosystem |
//! |--------|----------|-----------|
//! | [`RequirementsParser`] | `requirements.txt` | pypi |
//! | [`PackageJsonParser`] | `package.json` | npm |
//! | [`PomParser`] | `pom.xml` | maven |
//!
//! Parsers return a typed [`ParseError`] on malformed input instead of
//! raising; callers log it and treat the file as empty.

mod package_json;
mod pom;
mod requirements;

pub use package_json::PackageJsonParser;
pub use pom::PomParser;
pub use requirements::RequirementsParser;

use crate::model::Ecosystem;

/// A dependency as it appears in a manifest, before identifier enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDependency {
    pub name: String,
    pub version: String,
}

impl RawDependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Manifest is not valid JSON.
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Manifest is not valid XML.
    #[error("xml parse error: {0}")]
    Xml(String),
}

/// Trait for parsing a manifest dialect into raw dependencies.
pub trait ManifestParser: Send + Sync {
    /// Repository path of the manifest this parser handles.
    fn manifest_path(&self) -> &'static str;

    /// Ecosystem tag applied to every dependency this parser emits.
    fn ecosystem(&self) -> Ecosystem;

    /// Parses manifest text into dependencies, preserving in-file order.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the manifest cannot be parsed at all.
    /// Individually malformed entries are skipped, not errors.
    fn parse(&self, content: &str) -> Result<Vec<RawDependency>, ParseError>;
}

/// The fixed list of manifest files checked in every project, in the order
/// they are fetched and their records emitted.
pub fn all_parsers() -> Vec<Box<dyn ManifestParser>> {
    vec![
        Box::new(RequirementsParser),
        Box::new(PackageJsonParser),
        Box::new(PomParser),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_order_matches_candidate_paths() {
        let paths: Vec<&str> = all_parsers().iter().map(|p| p.manifest_path()).collect();
        assert_eq!(paths, ["requirements.txt", "package.json", "pom.xml"]);
    }
}
