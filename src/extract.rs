//! Extraction orchestrator.
//!
//! For each project, requests every candidate manifest file and feeds the
//! ones that exist to the matching parser. Output order is candidate-path
//! order, then in-file order; when projects are processed concurrently the
//! ordered stream keeps project enumeration order.

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::gitlab::{FileFetcher, Project};
use crate::model::{DependencyRecord, ProjectDependency};
use crate::parser::all_parsers;

/// Extracts and enriches the dependencies of a single project.
///
/// Missing manifests are silently skipped; unparseable ones are logged and
/// treated as empty.
pub async fn extract_project(fetcher: &dyn FileFetcher, project: &Project) -> Vec<ProjectDependency> {
    let mut dependencies = Vec::new();

    for parser in all_parsers() {
        let path = parser.manifest_path();
        let Some(content) = fetcher.fetch_file(project.id, path).await else {
            continue;
        };

        match parser.parse(&content) {
            Ok(raw) => {
                debug!(project = %project.name, path, count = raw.len(), "parsed manifest");
                for dep in raw {
                    let record = DependencyRecord::new(dep.name, dep.version, parser.ecosystem());
                    dependencies.push(ProjectDependency::new(
                        &project.name,
                        &project.web_url,
                        record,
                    ));
                }
            }
            Err(e) => {
                warn!(project = %project.name, path, error = %e, "skipping unparseable manifest");
            }
        }
    }

    dependencies
}

/// Extracts dependencies from every project.
///
/// With `concurrency > 1` projects are fetched through an ordered buffered
/// stream, so results still follow project enumeration order.
pub async fn extract_all(
    fetcher: &dyn FileFetcher,
    projects: &[Project],
    concurrency: usize,
) -> Vec<ProjectDependency> {
    if concurrency <= 1 {
        let mut all = Vec::new();
        for project in projects {
            all.extend(extract_project(fetcher, project).await);
        }
        return all;
    }

    stream::iter(projects.iter().map(|p| extract_project(fetcher, p)))
        .buffered(concurrency)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ecosystem;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FixtureFetcher {
        // (project_id, path) -> content
        files: HashMap<(u64, String), String>,
    }

    #[async_trait]
    impl FileFetcher for FixtureFetcher {
        async fn fetch_file(&self, project_id: u64, path: &str) -> Option<String> {
            self.files.get(&(project_id, path.to_string())).cloned()
        }
    }

    fn project(id: u64, name: &str) -> Project {
        Project {
            id,
            name: name.to_string(),
            web_url: format!("https://gitlab.example/acme/{name}"),
        }
    }

    #[tokio::test]
    async fn package_json_only_project_yields_one_npm_record() {
        let mut files = HashMap::new();
        files.insert(
            (1, "package.json".to_string()),
            r#"{"dependencies": {"left-pad": "1.0.0"}}"#.to_string(),
        );
        let fetcher = FixtureFetcher { files };

        let deps = extract_project(&fetcher, &project(1, "my-app")).await;

        assert_eq!(deps.len(), 1);
        let dep = &deps[0];
        assert_eq!(dep.library, "left-pad");
        assert_eq!(dep.version, "1.0.0");
        assert_eq!(dep.ecosystem, Ecosystem::Npm);
        assert_eq!(dep.purl, "pkg:npm/left-pad@1.0.0");
        assert!(dep.cpe.starts_with("cpe:2.3:a:left-pad:left-pad:1.0.0:"));
        assert_eq!(dep.project, "my-app");
    }

    #[tokio::test]
    async fn records_follow_candidate_path_order() {
        let mut files = HashMap::new();
        files.insert(
            (1, "package.json".to_string()),
            r#"{"dependencies": {"express": "4.18.2"}}"#.to_string(),
        );
        files.insert(
            (1, "requirements.txt".to_string()),
            "requests==2.31.0".to_string(),
        );
        let fetcher = FixtureFetcher { files };

        let deps = extract_project(&fetcher, &project(1, "mixed")).await;

        // requirements.txt comes before package.json in the candidate list.
        let names: Vec<&str> = deps.iter().map(|d| d.library.as_str()).collect();
        assert_eq!(names, ["requests", "express"]);
    }

    #[tokio::test]
    async fn unparseable_manifest_is_treated_as_empty() {
        let mut files = HashMap::new();
        files.insert(
            (1, "package.json".to_string()),
            r#"{"dependencies": "#.to_string(),
        );
        files.insert(
            (1, "requirements.txt".to_string()),
            "flask==3.0.0".to_string(),
        );
        let fetcher = FixtureFetcher { files };

        let deps = extract_project(&fetcher, &project(1, "broken")).await;

        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].library, "flask");
    }

    #[tokio::test]
    async fn project_without_manifests_yields_nothing() {
        let fetcher = FixtureFetcher {
            files: HashMap::new(),
        };
        let deps = extract_project(&fetcher, &project(7, "empty")).await;
        assert!(deps.is_empty());
    }

    #[tokio::test]
    async fn concurrent_extraction_keeps_project_order() {
        let mut files = HashMap::new();
        for id in 1..=4u64 {
            files.insert(
                (id, "requirements.txt".to_string()),
                format!("pkg{id}==1.0.{id}"),
            );
        }
        let fetcher = FixtureFetcher { files };
        let projects: Vec<Project> = (1..=4).map(|id| project(id, &format!("p{id}"))).collect();

        let sequential = extract_all(&fetcher, &projects, 1).await;
        let concurrent = extract_all(&fetcher, &projects, 4).await;

        assert_eq!(sequential, concurrent);
        let names: Vec<&str> = concurrent.iter().map(|d| d.library.as_str()).collect();
        assert_eq!(names, ["pkg1", "pkg2", "pkg3", "pkg4"]);
    }
}
