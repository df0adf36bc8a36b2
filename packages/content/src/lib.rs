#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static content for the radon canvas client.
//!
//! Reference neighborhoods, testing and remediation solutions, external
//! source links, and the map fallback samples are kept as TOML files in
//! `data/` and embedded at compile time. Editing content means editing a
//! data file, not code.

pub mod registry;

use radon_canvas_models::{RadonMapPoint, TornadoPoint};
use serde::{Deserialize, Serialize};

pub use registry::{
    map_fallback, reference_neighborhoods, solutions, sources, sources_by_category,
};

/// Errors that can occur while parsing embedded content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A data file is not valid TOML for its schema.
    #[error("Failed to parse content '{name}': {source}")]
    Toml {
        /// Data file name.
        name: &'static str,
        /// Underlying parse error.
        source: toml::de::Error,
    },
}

/// A St. Louis neighborhood from the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceNeighborhood {
    /// Neighborhood name.
    pub name: String,
    /// Approximate center latitude.
    pub latitude: f64,
    /// Approximate center longitude.
    pub longitude: f64,
    /// City ward number.
    pub ward: u32,
    /// ZIP code.
    pub zip_code: u32,
}

/// A radon testing method or remediation system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Heading.
    pub title: String,
    /// One-paragraph summary.
    pub description: String,
    /// How it works.
    pub details: Vec<String>,
    /// Advantages.
    pub pros: Vec<String>,
    /// Drawbacks.
    #[serde(default)]
    pub cons: Vec<String>,
    /// Typical cost range.
    pub cost: String,
    /// Installation note (remediation only).
    #[serde(default)]
    pub installation: Option<String>,
}

/// Both solution lists, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solutions {
    /// Ways to measure radon.
    pub testing: Vec<Solution>,
    /// Ways to reduce radon.
    pub remediation: Vec<Solution>,
}

/// An external resource link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    /// Link title.
    pub title: String,
    /// What the resource offers.
    pub description: String,
    /// Target URL.
    pub url: String,
    /// Grouping category.
    pub category: String,
    /// Decorative icon.
    #[serde(default)]
    pub icon: String,
}

/// Sources sharing one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCategory {
    /// Category name.
    pub name: String,
    /// Links in that category, in file order.
    pub sources: Vec<SourceLink>,
}

/// Sample map data used when the backend cannot supply it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFallback {
    /// Tornado path vertices.
    pub tornado_path: Vec<TornadoPoint>,
    /// Radon test results.
    pub radon_results: Vec<RadonMapPoint>,
}
