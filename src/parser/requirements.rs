//! Parser for pinned-version `requirements.txt` files.

use super::{ManifestParser, ParseError, RawDependency};
use crate::model::{Ecosystem, UNKNOWN_VERSION};

/// Parses `requirements.txt` lines of the form `name==version`.
///
/// Only the exact `==` pin is recognized; any line without it keeps the
/// whole line as the name and gets the `unknown` version sentinel.
pub struct RequirementsParser;

impl ManifestParser for RequirementsParser {
    fn manifest_path(&self) -> &'static str {
        "requirements.txt"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pypi
    }

    fn parse(&self, content: &str) -> Result<Vec<RawDependency>, ParseError> {
        let mut dependencies = Vec::new();

        for line in content.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split("==").collect();
            let name = parts[0].trim();
            if name.is_empty() {
                continue;
            }
            let version = match parts.get(1) {
                Some(v) => v.trim().to_string(),
                None => UNKNOWN_VERSION.to_string(),
            };

            dependencies.push(RawDependency::new(name, version));
        }

        Ok(dependencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<RawDependency> {
        RequirementsParser.parse(content).unwrap()
    }

    #[test]
    fn pinned_line_yields_name_and_version() {
        let deps = parse("pkg==1.2.3");
        assert_eq!(deps, vec![RawDependency::new("pkg", "1.2.3")]);
    }

    #[test]
    fn unpinned_line_yields_unknown_version() {
        let deps = parse("pkg");
        assert_eq!(deps, vec![RawDependency::new("pkg", "unknown")]);
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let content = "# tooling\n\nrequests==2.31.0\n# pinned for CI\nflask==3.0.0\n";
        let deps = parse(content);
        assert_eq!(
            deps,
            vec![
                RawDependency::new("requests", "2.31.0"),
                RawDependency::new("flask", "3.0.0"),
            ]
        );
    }

    #[test]
    fn trims_whitespace_around_name_and_version() {
        let deps = parse("requests == 2.31.0");
        assert_eq!(deps, vec![RawDependency::new("requests", "2.31.0")]);
    }

    #[test]
    fn preserves_in_file_order() {
        let deps = parse("b==2\na==1");
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn empty_input_yields_no_dependencies() {
        assert!(parse("").is_empty());
    }
}
