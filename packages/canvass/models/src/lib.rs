#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canvassing domain types shared across the radon canvas client.
//!
//! Neighborhoods and addresses are owned by the backend; these types are
//! the JSON contract the client reads and writes. Radon aggregates and map
//! points live in [`radon`].

pub mod radon;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use radon::{
    ApiStatus, DataSourceStatus, EPA_ACTION_LEVEL, HotNeighborhoodSort, RADON_RISK_TIERS,
    RadonMapPoint, RadonRiskTier, RadonTestResult, TornadoPoint, radon_risk_tier,
};

/// Message shown for a neighborhood whose messaging template is blank.
pub const DEFAULT_MESSAGING_TEMPLATE: &str = "Hello! I'm reaching out because your neighborhood has been identified as having elevated radon levels. Radon is a naturally occurring radioactive gas that can cause lung cancer. \n\nWe offer free or low-cost radon testing. Would you be interested in scheduling a test for your home?";

/// Message shown during a check-in at an address with no neighborhood.
pub const GENERIC_CHECK_IN_MESSAGE: &str = "Hello! I'm reaching out about radon testing for your home. Radon is a naturally occurring radioactive gas that can cause lung cancer.\n\nWe offer free or low-cost radon testing. Would you be interested in scheduling a test?";

/// Returns `template`, or [`DEFAULT_MESSAGING_TEMPLATE`] when it is blank.
#[must_use]
pub fn template_or_default(template: &str) -> &str {
    if template.trim().is_empty() {
        DEFAULT_MESSAGING_TEMPLATE
    } else {
        template
    }
}

/// Outreach risk tier assigned to a neighborhood by a coordinator.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    /// Lowest outreach priority.
    Low,
    /// Default tier for new neighborhoods.
    #[default]
    Medium,
    /// Highest outreach priority.
    High,
}

impl RiskLevel {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// Badge text shown on a neighborhood card (e.g. `HIGH RISK`).
    #[must_use]
    pub const fn badge_label(self) -> &'static str {
        match self {
            Self::Low => "LOW RISK",
            Self::Medium => "MEDIUM RISK",
            Self::High => "HIGH RISK",
        }
    }

    /// Badge style class for the tier.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Low => "badge-low",
            Self::Medium => "badge-medium",
            Self::High => "badge-high",
        }
    }
}

/// Outcome of visiting a household.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VisitStatus {
    /// Nobody has knocked yet. Assigned to every new address.
    #[default]
    NotVisited,
    /// Door knocked, no further interest recorded.
    Visited,
    /// Household wants to hear more.
    Interested,
    /// A radon test has been scheduled.
    Scheduled,
    /// The test was carried out.
    Completed,
}

/// Colour used for statuses the client does not recognise.
pub const DEFAULT_STATUS_COLOR: &str = "#6b7280";

impl VisitStatus {
    /// Returns all variants of this enum, in workflow order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::NotVisited,
            Self::Visited,
            Self::Interested,
            Self::Scheduled,
            Self::Completed,
        ]
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotVisited => "Not Visited",
            Self::Visited => "Visited",
            Self::Interested => "Interested",
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
        }
    }

    /// Display colour as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::NotVisited => DEFAULT_STATUS_COLOR,
            Self::Visited => "#3b82f6",
            Self::Interested => "#f59e0b",
            Self::Scheduled => "#8b5cf6",
            Self::Completed => "#10b981",
        }
    }
}

/// Status of an address as it appears on the wire.
///
/// Values outside [`VisitStatus`] are kept verbatim so they can be shown
/// and written back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressStatus {
    /// One of the statuses the client knows how to render.
    Known(VisitStatus),
    /// Anything else the backend sent.
    Other(String),
}

impl Default for AddressStatus {
    fn default() -> Self {
        Self::Known(VisitStatus::default())
    }
}

impl From<VisitStatus> for AddressStatus {
    fn from(status: VisitStatus) -> Self {
        Self::Known(status)
    }
}

impl AddressStatus {
    /// Label lookup; unknown values fall back to the raw value.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Known(status) => status.label(),
            Self::Other(raw) => raw,
        }
    }

    /// Colour lookup; unknown values fall back to [`DEFAULT_STATUS_COLOR`].
    #[must_use]
    pub const fn color(&self) -> &str {
        match self {
            Self::Known(status) => status.color(),
            Self::Other(_) => DEFAULT_STATUS_COLOR,
        }
    }

    /// The known status, if any.
    #[must_use]
    pub const fn known(&self) -> Option<VisitStatus> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Other(_) => None,
        }
    }
}

/// A neighborhood targeted for outreach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Backend-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Outreach risk tier.
    pub risk_level: RiskLevel,
    /// Canvassing script for this neighborhood. May be blank.
    #[serde(default)]
    pub messaging_template: String,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,
}

impl Neighborhood {
    /// The messaging template to show, substituting the default when blank.
    #[must_use]
    pub fn effective_template(&self) -> &str {
        template_or_default(&self.messaging_template)
    }
}

/// Payload for creating or replacing a neighborhood.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodCreate {
    /// Display name. Required.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Outreach risk tier. Required.
    pub risk_level: RiskLevel,
    /// Canvassing script.
    pub messaging_template: String,
}

impl From<&Neighborhood> for NeighborhoodCreate {
    fn from(n: &Neighborhood) -> Self {
        Self {
            name: n.name.clone(),
            description: n.description.clone(),
            risk_level: n.risk_level,
            messaging_template: n.messaging_template.clone(),
        }
    }
}

/// A household on the canvassing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Backend-assigned identifier.
    pub id: String,
    /// Street address as typed by the volunteer.
    pub address: String,
    /// Owning neighborhood, `None` when unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood_id: Option<String>,
    /// Visit status.
    #[serde(default)]
    pub status: AddressStatus,
    /// Notes from the latest check-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the address was first visited (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited_at: Option<String>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: String,
}

impl Address {
    /// Whether the address belongs to no neighborhood.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.neighborhood_id.as_deref().is_none_or(str::is_empty)
    }

    /// Calendar date of the first visit, if `visited_at` parses.
    ///
    /// Accepts RFC 3339 timestamps and naive ISO 8601 timestamps (with or
    /// without fractional seconds).
    #[must_use]
    pub fn visited_on(&self) -> Option<NaiveDate> {
        self.visited_at.as_deref().and_then(parse_date)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Payload for creating an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCreate {
    /// Street address. Required.
    pub address: String,
    /// Owning neighborhood.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood_id: Option<String>,
}

/// Partial update for an address. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressUpdate {
    /// New visit status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AddressStatus>,
    /// New notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
