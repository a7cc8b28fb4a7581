//! Parser for Node.js `package.json` files.
//!
//! Reads the `dependencies` and `devDependencies` maps, in that order.
//! Keys appearing in both maps are emitted twice; deduplication is left to
//! consumers that want it.

use serde::Deserialize;
use serde_json::Map;

use super::{ManifestParser, ParseError, RawDependency};
use crate::model::{Ecosystem, UNKNOWN_VERSION};

pub struct PackageJsonParser;

/// package.json structure (parsing only). `serde_json` is built with
/// `preserve_order`, so map iteration follows in-file key order.
#[derive(Deserialize)]
struct PackageJson {
    #[serde(default)]
    dependencies: Map<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: Map<String, serde_json::Value>,
}

impl ManifestParser for PackageJsonParser {
    fn manifest_path(&self) -> &'static str {
        "package.json"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn parse(&self, content: &str) -> Result<Vec<RawDependency>, ParseError> {
        let manifest: PackageJson = serde_json::from_str(content)?;

        let mut dependencies = Vec::new();
        for (name, version) in manifest
            .dependencies
            .iter()
            .chain(manifest.dev_dependencies.iter())
        {
            // Version specifiers are normally strings; anything else
            // (objects, null) counts as absent.
            let version = version.as_str().unwrap_or(UNKNOWN_VERSION);
            dependencies.push(RawDependency::new(name, version));
        }

        Ok(dependencies)
    }
}
