pub mod config;
pub mod convert;
pub mod extract;
pub mod gitlab;
pub mod identifier;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use gitlab::{FileFetcher, GitlabClient, Project};
pub use model::{DependencyRecord, Ecosystem, ExtractResult, ProjectDependency, ScanRow, SearchHit};
pub use parser::ManifestParser;
