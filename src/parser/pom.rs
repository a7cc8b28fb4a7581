//! Parser for Maven `pom.xml` files.
//!
//! Walks the `project > dependencies > dependency` element path with a
//! streaming reader. Each `<dependency>` element is handled independently,
//! so a single node and a list of nodes normalize identically.
//! `dependencyManagement` and plugin dependencies live under different
//! paths and are not read.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{ManifestParser, ParseError, RawDependency};
use crate::model::{Ecosystem, UNKNOWN_VERSION};

pub struct PomParser;

#[derive(Default)]
struct PomDependency {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
}

impl PomDependency {
    fn into_raw(self) -> RawDependency {
        RawDependency::new(
            format!("{}:{}", self.group_id, self.artifact_id),
            self.version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        )
    }
}

fn path_is(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

impl ManifestParser for PomParser {
    fn manifest_path(&self) -> &'static str {
        "pom.xml"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
    }

    fn parse(&self, content: &str) -> Result<Vec<RawDependency>, ParseError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut path: Vec<String> = Vec::new();
        let mut current: Option<PomDependency> = None;
        let mut dependencies = Vec::new();

        loop {
            match reader.read_event() {
                Err(e) => return Err(ParseError::Xml(e.to_string())),
                Ok(Event::Eof) => break,
                Ok(Event::Start(start)) => {
                    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    if path_is(&path, &["project", "dependencies"]) && name == "dependency" {
                        current = Some(PomDependency::default());
                    }
                    path.push(name);
                }
                Ok(Event::Text(text)) => {
                    let in_dependency_field = path.len() == 4
                        && path_is(&path[..3], &["project", "dependencies", "dependency"]);
                    if in_dependency_field {
                        if let Some(dep) = current.as_mut() {
                            let value = text
                                .decode()
                                .map_err(|e| ParseError::Xml(e.to_string()))?
                                .trim()
                                .to_string();
                            match path[3].as_str() {
                                "groupId" => dep.group_id = value,
                                "artifactId" => dep.artifact_id = value,
                                "version" => dep.version = Some(value),
                                _ => {}
                            }
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    let closed = path.pop();
                    if closed.as_deref() == Some("dependency")
                        && path_is(&path, &["project", "dependencies"])
                    {
                        if let Some(dep) = current.take() {
                            dependencies.push(dep.into_raw());
                        }
                    }
                }
                Ok(_) => {}
            }
        }

        Ok(dependencies)
    }
}
