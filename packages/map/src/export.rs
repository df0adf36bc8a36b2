//! `GeoJSON` export of a [`MapOverlay`].
//!
//! The tornado path becomes a `LineString` feature and each marker a
//! `Point` feature, with styling carried as `simplestyle`-like properties.
//! Viewport and tile settings travel as foreign members of the
//! collection.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::{LatLng, MapOverlay, RadonMarker, TILE_ATTRIBUTION, TILE_URL, TORNADO_PATH_STYLE};

fn position(point: LatLng) -> Vec<f64> {
    vec![point.longitude, point.latitude]
}

fn object(value: serde_json::Value) -> Option<JsonObject> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

fn feature(geometry: Value, properties: serde_json::Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: None,
        properties: object(properties),
        foreign_members: None,
    }
}

fn marker_feature(marker: &RadonMarker) -> Feature {
    feature(
        Value::Point(position(marker.position)),
        json!({
            "kind": "radon_result",
            "level": marker.level,
            "class": marker.class.label(),
            "marker-color": marker.style.fill_color,
            "marker-radius": marker.style.radius,
            "stroke": marker.style.stroke_color,
            "stroke-width": marker.style.weight,
            "stroke-opacity": marker.style.opacity,
            "fill-opacity": marker.style.fill_opacity,
            "city": marker.city,
            "zip_code": marker.zip_code,
            "popup": marker.popup(),
        }),
    )
}

impl MapOverlay {
    /// Converts the overlay to a `FeatureCollection`.
    ///
    /// A path with fewer than two valid vertices draws no line.
    #[must_use]
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features = Vec::with_capacity(self.markers.len() + 1);

        if self.tornado_path.len() >= 2 {
            features.push(feature(
                Value::LineString(self.tornado_path.iter().copied().map(position).collect()),
                json!({
                    "kind": "tornado_path",
                    "stroke": TORNADO_PATH_STYLE.color,
                    "stroke-width": TORNADO_PATH_STYLE.weight,
                    "stroke-opacity": TORNADO_PATH_STYLE.opacity,
                }),
            ));
        }
        features.extend(self.markers.iter().map(marker_feature));

        FeatureCollection {
            bbox: self.bounds.map(|b| {
                vec![
                    b.south_west.longitude,
                    b.south_west.latitude,
                    b.north_east.longitude,
                    b.north_east.latitude,
                ]
            }),
            features,
            foreign_members: object(json!({
                "center": {
                    "latitude": self.center.latitude,
                    "longitude": self.center.longitude,
                },
                "zoom": self.zoom,
                "tiles": {
                    "url": TILE_URL,
                    "attribution": TILE_ATTRIBUTION,
                },
                "summary": {
                    "tornado_points": self.summary.tornado_points,
                    "valid_tests": self.summary.valid_tests,
                    "high_count": self.summary.high_count,
                    "low_count": self.summary.low_count,
                    "high_percent": self.summary.high_percent(),
                    "low_percent": self.summary.low_percent(),
                },
            })),
        }
    }

    /// Pretty-printed `GeoJSON` text of [`Self::to_geojson`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_geojson_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_geojson())
    }
}
