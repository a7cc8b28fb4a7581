//! Core data types for dependencies, search hits, and scan rows.
//!
//! This module contains the fundamental types used throughout deptrawl:
//!
//! - [`DependencyRecord`] - A dependency with derived purl/CPE identifiers
//! - [`Ecosystem`] - The package ecosystem a manifest belongs to
//! - [`ProjectDependency`] - A dependency tagged with its source project
//! - [`ExtractResult`] - Complete extraction results
//! - [`SearchHit`] - A single global-search match
//! - [`ScanRow`] - A vulnerability-scan CSV row with its CPE
//!
//! # Example
//!
//! ```
//! use deptrawl::model::{DependencyRecord, Ecosystem};
//!
//! let record = DependencyRecord::new("left-pad", "1.0.0", Ecosystem::Npm);
//! assert_eq!(record.purl, "pkg:npm/left-pad@1.0.0");
//! ```

mod dependency;
mod row;

pub use dependency::*;
pub use row::*;
