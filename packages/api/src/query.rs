//! Query parameters for the aggregate endpoints.

use radon_canvas_models::HotNeighborhoodSort;

/// Parameters for `GET /radon/hot-neighborhoods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotNeighborhoodsQuery {
    /// Only include neighborhoods with at least this many tests.
    pub min_tests: u32,
    /// Server-side sort key.
    pub sort_by: HotNeighborhoodSort,
}

impl Default for HotNeighborhoodsQuery {
    fn default() -> Self {
        Self {
            min_tests: 5,
            sort_by: HotNeighborhoodSort::Average,
        }
    }
}

impl HotNeighborhoodsQuery {
    /// Query string pairs, exactly as sent.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("minTests", self.min_tests.to_string()),
            ("sortBy", self.sort_by.to_string()),
        ]
    }
}

/// Parameters for `GET /map/radon-results`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadonResultsQuery {
    /// Restrict to tests near the tornado path.
    pub near_tornado: bool,
    /// Radius around the path, in miles.
    pub radius_miles: f64,
}

impl RadonResultsQuery {
    /// Every result in the area, regardless of distance to the path.
    #[must_use]
    pub const fn all_results() -> Self {
        Self {
            near_tornado: false,
            radius_miles: 2.0,
        }
    }

    /// Query string pairs, exactly as sent.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("near_tornado", self.near_tornado.to_string()),
            ("radius_miles", self.radius_miles.to_string()),
        ]
    }
}
