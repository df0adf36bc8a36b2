//! Radon test aggregates, map points, and the risk tier ladder.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// EPA action level in pCi/L.
pub const EPA_ACTION_LEVEL: f64 = 4.0;

/// Aggregate radon statistics for one neighborhood, computed upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadonTestResult {
    /// Neighborhood name as known to the data warehouse.
    pub neighborhood: String,
    /// ZIP code.
    pub zip_code: u32,
    /// City ward number.
    pub ward: u32,
    /// Number of valid tests.
    pub test_count: u64,
    /// Mean test result in pCi/L.
    pub average_radon_level: f64,
    /// Tests at or above the action level.
    pub high_risk_count: u64,
    /// Share of tests at or above the action level, 0-100.
    pub percent_above_action_level: f64,
}

impl RadonTestResult {
    /// Risk tier for this row's average level.
    #[must_use]
    pub fn risk_tier(&self) -> &'static RadonRiskTier {
        radon_risk_tier(self.average_radon_level)
    }
}

/// Sort key accepted by the hot-neighborhoods endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HotNeighborhoodSort {
    /// Average radon level, descending.
    #[default]
    Average,
    /// Number of tests.
    Count,
    /// Share of tests above the action level.
    Percent,
}

impl HotNeighborhoodSort {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Average, Self::Count, Self::Percent]
    }

    /// Label shown in the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Average => "Average Radon Level",
            Self::Count => "Number of Tests",
            Self::Percent => "% Above Action Level",
        }
    }
}

/// One rung of the display risk ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadonRiskTier {
    /// Inclusive lower bound in pCi/L.
    pub threshold: f64,
    /// Label, e.g. `Very High`.
    pub label: &'static str,
    /// Foreground colour.
    pub color: &'static str,
    /// Background colour.
    pub background: &'static str,
    /// Badge style class.
    pub badge_class: &'static str,
}

/// Risk ladder, highest threshold first. The last rung catches everything.
pub const RADON_RISK_TIERS: &[RadonRiskTier] = &[
    RadonRiskTier {
        threshold: 8.0,
        label: "Very High",
        color: "#991b1b",
        background: "#fee2e2",
        badge_class: "badge-very-high",
    },
    RadonRiskTier {
        threshold: 6.0,
        label: "High",
        color: "#b45309",
        background: "#fef3c7",
        badge_class: "badge-high",
    },
    RadonRiskTier {
        threshold: EPA_ACTION_LEVEL,
        label: "Moderate",
        color: "#92400e",
        background: "#fed7aa",
        badge_class: "badge-medium",
    },
    RadonRiskTier {
        threshold: f64::NEG_INFINITY,
        label: "Low",
        color: "#065f46",
        background: "#d1fae5",
        badge_class: "badge-low",
    },
];

/// Returns the first tier whose threshold `average` reaches.
///
/// `NaN` lands in the lowest tier.
#[must_use]
pub fn radon_risk_tier(average: f64) -> &'static RadonRiskTier {
    let last = &RADON_RISK_TIERS[RADON_RISK_TIERS.len() - 1];
    RADON_RISK_TIERS
        .iter()
        .find(|tier| average >= tier.threshold)
        .unwrap_or(last)
}

/// A vertex of the tornado path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TornadoPoint {
    /// Latitude; `None` when the backend sent null.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude; `None` when the backend sent null.
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl TornadoPoint {
    /// Creates a point from known coordinates.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// `(lat, lng)` if both are present and finite.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        finite_pair(self.latitude, self.longitude)
    }
}

/// A single household radon test placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadonMapPoint {
    /// Latitude; `None` when the backend sent null.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude; `None` when the backend sent null.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Measured level in pCi/L.
    #[serde(default)]
    pub final_result: Option<f64>,
    /// `"Y"` for a valid test.
    #[serde(default)]
    pub valid_test: String,
    /// City name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// ZIP code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl RadonMapPoint {
    /// Whether the test was flagged valid upstream.
    #[must_use]
    pub fn is_valid_test(&self) -> bool {
        self.valid_test == "Y"
    }

    /// `(lat, lng)` if both are present and finite.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        finite_pair(self.latitude, self.longitude)
    }

    /// Measured level, treating a missing value as zero.
    #[must_use]
    pub fn level(&self) -> f64 {
        self.final_result.unwrap_or(0.0)
    }
}

fn finite_pair(lat: Option<f64>, lng: Option<f64>) -> Option<(f64, f64)> {
    match (lat, lng) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
        _ => None,
    }
}

/// Backend health and data source report from `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// `"running"` when the API is up.
    pub status: String,
    /// Where the radon and tornado data comes from.
    pub data_source: DataSourceStatus,
}

/// Data warehouse connectivity as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceStatus {
    /// Warehouse integration is configured.
    #[serde(default)]
    pub snowflake_enabled: bool,
    /// Warehouse connection succeeded.
    #[serde(default)]
    pub snowflake_connected: bool,
    /// The backend is serving sample data.
    #[serde(default)]
    pub using_sample_data: bool,
    /// Connection error, if any.
    #[serde(default)]
    pub error: Option<String>,
}
