//! Thin client for the GitLab REST API.
//!
//! Three endpoints are used: paginated project listing, raw repository file
//! retrieval, and paginated global blob search. Authentication is a
//! `PRIVATE-TOKEN` header on every request. Non-success responses are
//! logged and treated as "no data" rather than failures; only transport
//! errors on the project listing propagate.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::SearchHit;

const PER_PAGE: u32 = 100;

/// A project as returned by the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub web_url: String,
}

/// Fetches raw manifest content for a project.
///
/// The extraction orchestrator depends on this seam instead of the concrete
/// client so tests can drive it with in-memory fixtures.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Returns the file body, or `None` when the file is absent or the
    /// request failed. Absence is not an error.
    async fn fetch_file(&self, project_id: u64, path: &str) -> Option<String>;
}

pub struct GitlabClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    git_ref: String,
}

impl GitlabClient {
    pub fn new(base_url: &str, token: Option<String>, git_ref: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            git_ref: git_ref.to_string(),
        }
    }

    /// Starts a GET request with the auth header applied when a token is
    /// configured. Public instances work without one.
    fn get(&self, url: impl reqwest::IntoUrl) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(ref token) = self.token {
            request = request.header("PRIVATE-TOKEN", token);
        }
        request
    }

    /// Lists all reachable projects, following `Link` header pagination
    /// until no `rel="next"` URL remains.
    ///
    /// A non-success status yields an empty list (logged), matching the
    /// "no projects found" early exit downstream.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let mut projects = Vec::new();
        let mut url = Some(format!(
            "{}/api/v4/projects?per_page={}",
            self.base_url, PER_PAGE
        ));

        while let Some(page_url) = url {
            debug!(url = %page_url, "fetching project page");
            let response = self.get(&page_url).send().await?;

            if !response.status().is_success() {
                warn!(status = %response.status(), "error fetching projects");
                return Ok(Vec::new());
            }

            url = response
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_link);

            let page: Vec<Project> = response.json().await?;
            projects.extend(page);
        }

        Ok(projects)
    }

    /// Runs a paginated global blob search for `term`, stopping at the
    /// first empty page or non-success status.
    pub async fn search_blobs(&self, term: &str) -> Result<Vec<SearchHit>> {
        let mut hits = Vec::new();
        let mut page = 1u32;

        loop {
            let page_param = page.to_string();
            let per_page_param = PER_PAGE.to_string();
            let response = self
                .get(format!("{}/api/v4/search", self.base_url))
                .query(&[
                    ("scope", "blobs"),
                    ("search", term),
                    ("page", page_param.as_str()),
                    ("per_page", per_page_param.as_str()),
                ])
                .send()
                .await?;

            if !response.status().is_success() {
                warn!(status = %response.status(), "error during search");
                break;
            }

            let results: Vec<BlobResult> = response.json().await?;
            if results.is_empty() {
                break;
            }

            hits.extend(results.into_iter().map(BlobResult::into_hit));
            page += 1;
        }

        Ok(hits)
    }
}

#[async_trait]
impl FileFetcher for GitlabClient {
    async fn fetch_file(&self, project_id: u64, path: &str) -> Option<String> {
        // Candidate manifest paths are plain filenames; encode separators
        // anyway so nested paths work too.
        let encoded = path.replace('/', "%2F");
        let url = format!(
            "{}/api/v4/projects/{}/repository/files/{}/raw?ref={}",
            self.base_url, project_id, encoded, self.git_ref
        );

        let response = self.get(&url).send().await.ok()?;

        if !response.status().is_success() {
            return None;
        }

        response.text().await.ok()
    }
}

/// A blob search result (parsing only).
#[derive(Deserialize)]
struct BlobResult {
    #[serde(default)]
    project: Option<BlobProject>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    startline: Option<u64>,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Deserialize)]
struct BlobProject {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    web_url: Option<String>,
}

impl BlobResult {
    fn into_hit(self) -> SearchHit {
        let (project_name, project_url) = match self.project {
            Some(p) => (p.name, p.web_url),
            None => (None, None),
        };
        SearchHit {
            project_name,
            project_url,
            file_path: self.path,
            line_number: self.startline,
            snippet: self.data,
        }
    }
}

/// Extracts the `rel="next"` URL from a `Link` header value.
fn next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let mut sections = part.split(';');
        let url = sections.next()?.trim();
        let is_next = sections
            .any(|s| s.trim().eq_ignore_ascii_case(r#"rel="next""#));
        if is_next {
            return Some(url.trim_start_matches('<').trim_end_matches('>').to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_link_extracts_next_url() {
        let header = r#"<https://gitlab.com/api/v4/projects?page=2>; rel="next", <https://gitlab.com/api/v4/projects?page=1>; rel="first""#;
        assert_eq!(
            next_link(header),
            Some("https://gitlab.com/api/v4/projects?page=2".to_string())
        );
    }

    #[test]
    fn next_link_absent_when_on_last_page() {
        let header = r#"<https://gitlab.com/api/v4/projects?page=1>; rel="first", <https://gitlab.com/api/v4/projects?page=3>; rel="last""#;
        assert_eq!(next_link(header), None);
    }

    #[test]
    fn next_link_handles_empty_header() {
        assert_eq!(next_link(""), None);
    }

    #[test]
    fn blob_result_maps_missing_fields() {
        let result: BlobResult = serde_json::from_str("{}").unwrap();
        let hit = result.into_hit();
        assert_eq!(hit.project_name, None);
        assert_eq!(hit.line_number, None);
    }

    #[test]
    fn blob_result_maps_nested_project() {
        let json = r#"{
            "project": {"name": "my-app", "web_url": "https://gitlab.com/acme/my-app"},
            "path": "src/main.rs",
            "startline": 42,
            "data": "let secret = ..."
        }"#;
        let result: BlobResult = serde_json::from_str(json).unwrap();
        let hit = result.into_hit();
        assert_eq!(hit.project_name.as_deref(), Some("my-app"));
        assert_eq!(hit.file_path.as_deref(), Some("src/main.rs"));
        assert_eq!(hit.line_number, Some(42));
    }
}
