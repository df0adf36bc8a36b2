#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Overlay geometry for the tornado / radon map.
//!
//! Turns the raw tornado path and radon result points into what the map
//! draws: a styled polyline, one styled marker per valid test, a centre
//! and bounding region for the viewport, and summary tallies. The overlay
//! can be exported as a `GeoJSON` `FeatureCollection` for any slippy-map
//! viewer.

pub mod export;

use geo::{BoundingRect, Centroid, MultiPoint, Point};
use radon_canvas_models::{RadonMapPoint, TornadoPoint};

/// St. Louis city centre, used when there is no tornado path to centre on.
pub const DEFAULT_CENTER: LatLng = LatLng::new(38.6270, -90.1994);

/// Initial zoom level of the map.
pub const DEFAULT_ZOOM: u8 = 11;

/// Results at or above this level (pCi/L) are drawn as elevated.
pub const HIGH_RADON_THRESHOLD: f64 = 4.1;

/// `OpenStreetMap` raster tile URL template.
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the tile provider.
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Style of the tornado path polyline.
pub const TORNADO_PATH_STYLE: PathStyle = PathStyle {
    color: "#dc2626",
    weight: 4,
    opacity: 0.8,
};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    const fn from_pair((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }

    fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    fn from_point(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

/// Axis-aligned region covering a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    /// Minimum latitude and longitude.
    pub south_west: LatLng,
    /// Maximum latitude and longitude.
    pub north_east: LatLng,
}

/// Stroke style of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f64,
}

/// Arithmetic mean of `points`, or `None` when empty.
#[must_use]
pub fn centroid(points: &[LatLng]) -> Option<LatLng> {
    multi_point(points).centroid().map(LatLng::from_point)
}

/// Smallest region containing every point, or `None` when empty.
#[must_use]
pub fn bounds(points: &[LatLng]) -> Option<MapBounds> {
    multi_point(points).bounding_rect().map(|rect| MapBounds {
        south_west: LatLng::new(rect.min().y, rect.min().x),
        north_east: LatLng::new(rect.max().y, rect.max().x),
    })
}

fn multi_point(points: &[LatLng]) -> MultiPoint<f64> {
    MultiPoint::new(points.iter().map(|p| p.to_point()).collect())
}

/// Vertices of the tornado path that have finite coordinates, in order.
#[must_use]
pub fn valid_path(path: &[TornadoPoint]) -> Vec<LatLng> {
    path.iter()
        .filter_map(TornadoPoint::coordinates)
        .map(LatLng::from_pair)
        .collect()
}

/// Centre for a tornado path: its centroid, or [`DEFAULT_CENTER`] when no
/// vertex has valid coordinates.
#[must_use]
pub fn path_center(path: &[TornadoPoint]) -> LatLng {
    centroid(&valid_path(path)).unwrap_or(DEFAULT_CENTER)
}

/// Two-way bucketing of a radon result for marker styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadonClass {
    /// At or above [`HIGH_RADON_THRESHOLD`].
    High,
    /// Below [`HIGH_RADON_THRESHOLD`].
    Low,
}

impl RadonClass {
    #[must_use]
    pub fn classify(level: f64) -> Self {
        if level >= HIGH_RADON_THRESHOLD {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Marker fill colour.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::High => "#dc2626",
            Self::Low => "#2563eb",
        }
    }

    /// Marker radius in pixels.
    #[must_use]
    pub const fn radius(self) -> u8 {
        match self {
            Self::High => 5,
            Self::Low => 4,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Radon (>=4.1 pCi/L)",
            Self::Low => "Low Radon (<4.1 pCi/L)",
        }
    }

    /// Popup status line.
    #[must_use]
    pub const fn status_line(self) -> &'static str {
        match self {
            Self::High => "Above EPA Action Level",
            Self::Low => "Below Action Level",
        }
    }
}

/// Circle marker style shared by all radon markers apart from fill and
/// radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill_color: &'static str,
    pub radius: u8,
    pub stroke_color: &'static str,
    pub weight: u8,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl From<RadonClass> for MarkerStyle {
    fn from(class: RadonClass) -> Self {
        Self {
            fill_color: class.color(),
            radius: class.radius(),
            stroke_color: "#fff",
            weight: 1,
            opacity: 0.8,
            fill_opacity: 0.7,
        }
    }
}

/// One drawable radon result.
#[derive(Debug, Clone, PartialEq)]
pub struct RadonMarker {
    pub position: LatLng,
    /// Measured level, if reported.
    pub level: Option<f64>,
    pub class: RadonClass,
    pub style: MarkerStyle,
    pub city: Option<String>,
    pub zip_code: Option<String>,
}

impl RadonMarker {
    /// Builds a marker for a valid test with finite coordinates.
    #[must_use]
    pub fn from_point(point: &RadonMapPoint) -> Option<Self> {
        if !point.is_valid_test() {
            return None;
        }
        let position = LatLng::from_pair(point.coordinates()?);
        let class = RadonClass::classify(point.level());

        Some(Self {
            position,
            level: point.final_result.filter(|v| v.is_finite()),
            class,
            style: class.into(),
            city: point.city.clone().filter(|c| !c.is_empty()),
            zip_code: point.zip_code.clone().filter(|z| !z.is_empty()),
        })
    }

    /// Multi-line popup text.
    #[must_use]
    pub fn popup(&self) -> String {
        let mut lines = vec!["Radon Test Result".to_string()];
        lines.push(self.level.map_or_else(
            || "Level: N/A pCi/L".to_string(),
            |level| format!("Level: {level:.2} pCi/L"),
        ));
        if let Some(city) = &self.city {
            lines.push(format!("City: {city}"));
        }
        if let Some(zip) = &self.zip_code {
            lines.push(format!("ZIP: {zip}"));
        }
        lines.push(format!("Status: {}", self.class.status_line()));
        lines.join("\n")
    }
}

/// Tallies shown under the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapSummary {
    /// Number of tornado path vertices loaded.
    pub tornado_points: usize,
    /// Results flagged as valid tests.
    pub valid_tests: usize,
    /// Valid tests at or above [`HIGH_RADON_THRESHOLD`].
    pub high_count: usize,
    /// Valid tests below [`HIGH_RADON_THRESHOLD`].
    pub low_count: usize,
}

impl MapSummary {
    #[must_use]
    pub fn from_data(path: &[TornadoPoint], results: &[RadonMapPoint]) -> Self {
        let mut summary = Self {
            tornado_points: path.len(),
            ..Self::default()
        };
        for result in results.iter().filter(|r| r.is_valid_test()) {
            summary.valid_tests += 1;
            match RadonClass::classify(result.level()) {
                RadonClass::High => summary.high_count += 1,
                RadonClass::Low => summary.low_count += 1,
            }
        }
        summary
    }

    /// Share of elevated results, 0 when there are none.
    #[must_use]
    pub fn high_percent(&self) -> f64 {
        percent(self.high_count, self.high_count + self.low_count)
    }

    /// Share of results below the threshold, 0 when there are none.
    #[must_use]
    pub fn low_percent(&self) -> f64 {
        percent(self.low_count, self.high_count + self.low_count)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Everything the map draws for one load.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOverlay {
    pub center: LatLng,
    pub zoom: u8,
    /// Region covering all valid points of both datasets.
    pub bounds: Option<MapBounds>,
    /// Valid tornado path vertices, in order.
    pub tornado_path: Vec<LatLng>,
    pub markers: Vec<RadonMarker>,
    pub summary: MapSummary,
}

impl MapOverlay {
    /// Builds the overlay around `center`.
    #[must_use]
    pub fn build(path: &[TornadoPoint], results: &[RadonMapPoint], center: LatLng) -> Self {
        let tornado_path = valid_path(path);
        let markers: Vec<RadonMarker> =
            results.iter().filter_map(RadonMarker::from_point).collect();

        let all_points: Vec<LatLng> = tornado_path
            .iter()
            .copied()
            .chain(
                results
                    .iter()
                    .filter_map(RadonMapPoint::coordinates)
                    .map(LatLng::from_pair),
            )
            .collect();

        let skipped = results.len() - markers.len();
        if skipped > 0 {
            log::debug!("Skipped {skipped} radon results without a valid test or coordinates");
        }

        Self {
            center,
            zoom: DEFAULT_ZOOM,
            bounds: bounds(&all_points),
            tornado_path,
            markers,
            summary: MapSummary::from_data(path, results),
        }
    }

    /// Whether there is anything to draw at all.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.summary.tornado_points > 0 || !self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radon(lat: f64, lng: f64, level: f64) -> RadonMapPoint {
        RadonMapPoint {
            latitude: Some(lat),
            longitude: Some(lng),
            final_result: Some(level),
            valid_test: "Y".to_string(),
            city: Some("St. Louis".to_string()),
            zip_code: Some("63113".to_string()),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn centroid_is_mean_of_points() {
        let c = centroid(&[LatLng::new(38.0, -90.0), LatLng::new(39.0, -91.0)]).unwrap();
        assert!(approx(c.latitude, 38.5));
        assert!(approx(c.longitude, -90.5));
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn path_center_ignores_invalid_vertices() {
        let path = [
            TornadoPoint::new(38.0, -90.0),
            TornadoPoint::new(f64::NAN, -95.0),
            TornadoPoint {
                latitude: None,
                longitude: Some(-80.0),
            },
            TornadoPoint::new(40.0, -92.0),
        ];
        let c = path_center(&path);
        assert!(approx(c.latitude, 39.0));
        assert!(approx(c.longitude, -91.0));
    }

    #[test]
    fn empty_path_centres_on_st_louis() {
        assert_eq!(path_center(&[]), DEFAULT_CENTER);
    }

    #[test]
    fn threshold_result_is_red_and_larger() {
        let high = RadonMarker::from_point(&radon(38.6, -90.2, 4.1)).unwrap();
        assert_eq!(high.class, RadonClass::High);
        assert_eq!(high.style.fill_color, "#dc2626");
        assert_eq!(high.style.radius, 5);

        let low = RadonMarker::from_point(&radon(38.6, -90.2, 4.0)).unwrap();
        assert_eq!(low.class, RadonClass::Low);
        assert_eq!(low.style.fill_color, "#2563eb");
        assert_eq!(low.style.radius, 4);
        assert!(high.style.radius > low.style.radius);
    }

    #[test]
    fn invalid_tests_and_bad_coordinates_are_not_drawn() {
        let mut invalid = radon(38.6, -90.2, 9.0);
        invalid.valid_test = "N".to_string();
        let mut no_lat = radon(38.6, -90.2, 9.0);
        no_lat.latitude = None;
        let infinite = radon(f64::INFINITY, -90.2, 9.0);

        assert!(RadonMarker::from_point(&invalid).is_none());
        assert!(RadonMarker::from_point(&no_lat).is_none());
        assert!(RadonMarker::from_point(&infinite).is_none());
    }

    #[test]
    fn popup_text() {
        let marker = RadonMarker::from_point(&radon(38.6, -90.2, 5.2)).unwrap();
        assert_eq!(
            marker.popup(),
            "Radon Test Result\nLevel: 5.20 pCi/L\nCity: St. Louis\nZIP: 63113\nStatus: Above EPA Action Level"
        );

        let mut bare = radon(38.6, -90.2, 0.0);
        bare.final_result = None;
        bare.city = None;
        bare.zip_code = Some(String::new());
        let marker = RadonMarker::from_point(&bare).unwrap();
        assert_eq!(
            marker.popup(),
            "Radon Test Result\nLevel: N/A pCi/L\nStatus: Below Action Level"
        );
    }

    #[test]
    fn summary_counts_valid_tests_only() {
        let mut invalid = radon(38.6, -90.2, 9.0);
        invalid.valid_test = "N".to_string();
        let results = [
            radon(38.6, -90.2, 4.1),
            radon(38.6, -90.2, 6.0),
            radon(38.6, -90.2, 3.0),
            radon(38.6, -90.2, 1.0),
            invalid,
        ];
        let summary = MapSummary::from_data(&[TornadoPoint::new(38.6, -90.2)], &results);
        assert_eq!(summary.tornado_points, 1);
        assert_eq!(summary.valid_tests, 4);
        assert_eq!(summary.high_count, 2);
        assert_eq!(summary.low_count, 2);
        assert!(approx(summary.high_percent(), 50.0));
        assert!(approx(summary.low_percent(), 50.0));
    }

    #[test]
    fn summary_percentages_are_zero_without_tests() {
        let summary = MapSummary::from_data(&[], &[]);
        assert_eq!(summary.valid_tests, 0);
        assert!(approx(summary.high_percent(), 0.0));
        assert!(approx(summary.low_percent(), 0.0));
    }

    #[test]
    fn bounds_cover_both_datasets() {
        let path = [TornadoPoint::new(38.65, -90.23), TornadoPoint::new(38.67, -90.21)];
        let mut invalid = radon(38.50, -90.40, 2.0);
        invalid.valid_test = "N".to_string();
        let results = [radon(38.70, -90.20, 5.0), invalid];

        let overlay = MapOverlay::build(&path, &results, path_center(&path));
        let bounds = overlay.bounds.unwrap();
        assert!(approx(bounds.south_west.latitude, 38.50));
        assert!(approx(bounds.south_west.longitude, -90.40));
        assert!(approx(bounds.north_east.latitude, 38.70));
        assert!(approx(bounds.north_east.longitude, -90.20));
        assert_eq!(overlay.tornado_path.len(), 2);
        assert_eq!(overlay.markers.len(), 1);
        assert_eq!(overlay.zoom, DEFAULT_ZOOM);
        assert!(overlay.has_data());
    }

    #[test]
    fn empty_overlay_has_no_data() {
        let overlay = MapOverlay::build(&[], &[], DEFAULT_CENTER);
        assert!(overlay.bounds.is_none());
        assert!(!overlay.has_data());
    }
}
