//! Compile-time registry of content data files.
//!
//! Each entry is a TOML document embedded via `include_str!`. Parse
//! failures indicate a development error and are caught by the tests
//! below.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{
    ContentError, MapFallback, ReferenceNeighborhood, Solutions, SourceCategory, SourceLink,
};

/// Number of embedded records per file. Enforced by tests.
#[cfg(test)]
const EXPECTED_REFERENCE_COUNT: usize = 62;
#[cfg(test)]
const EXPECTED_TESTING_COUNT: usize = 4;
#[cfg(test)]
const EXPECTED_REMEDIATION_COUNT: usize = 8;
#[cfg(test)]
const EXPECTED_SOURCE_COUNT: usize = 9;

const REFERENCE_TOML: (&str, &str) = (
    "reference_neighborhoods",
    include_str!("../data/reference_neighborhoods.toml"),
);
const SOLUTIONS_TOML: (&str, &str) = ("solutions", include_str!("../data/solutions.toml"));
const SOURCES_TOML: (&str, &str) = ("sources", include_str!("../data/sources.toml"));
const MAP_FALLBACK_TOML: (&str, &str) = (
    "map_fallback",
    include_str!("../data/map_fallback.toml"),
);

#[derive(Deserialize)]
struct ReferenceFile {
    neighborhoods: Vec<ReferenceNeighborhood>,
}

#[derive(Deserialize)]
struct SourcesFile {
    sources: Vec<SourceLink>,
}

/// Parses one embedded document.
///
/// # Errors
///
/// Returns [`ContentError::Toml`] if the document does not match `T`.
pub fn parse<T: DeserializeOwned>(
    (name, toml_str): (&'static str, &str),
) -> Result<T, ContentError> {
    toml::de::from_str(toml_str).map_err(|source| ContentError::Toml { name, source })
}

fn load<T: DeserializeOwned>(entry: (&'static str, &str)) -> T {
    parse(entry).unwrap_or_else(|e| panic!("{e}"))
}

/// The St. Louis neighborhood reference table, in file order.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse.
#[must_use]
pub fn reference_neighborhoods() -> Vec<ReferenceNeighborhood> {
    load::<ReferenceFile>(REFERENCE_TOML).neighborhoods
}

/// Testing and remediation solutions.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse.
#[must_use]
pub fn solutions() -> Solutions {
    load(SOLUTIONS_TOML)
}

/// External resource links, in file order.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse.
#[must_use]
pub fn sources() -> Vec<SourceLink> {
    load::<SourcesFile>(SOURCES_TOML).sources
}

/// Source links grouped by category, categories in order of first
/// appearance.
#[must_use]
pub fn sources_by_category() -> Vec<SourceCategory> {
    group_by_category(sources())
}

fn group_by_category(links: Vec<SourceLink>) -> Vec<SourceCategory> {
    let mut groups: Vec<SourceCategory> = Vec::new();
    for link in links {
        if let Some(group) = groups.iter_mut().find(|g| g.name == link.category) {
            group.sources.push(link);
        } else {
            groups.push(SourceCategory {
                name: link.category.clone(),
                sources: vec![link],
            });
        }
    }
    groups
}

/// Sample tornado path and radon results for the map view.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse.
#[must_use]
pub fn map_fallback() -> MapFallback {
    load(MAP_FALLBACK_TOML)
}
