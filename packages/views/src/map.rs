//! Tornado path and radon results map.
//!
//! The two datasets are fetched concurrently and independently. A failed
//! fetch is replaced by the embedded sample data so the map still renders;
//! only when both fail and no samples are available does the view enter
//! its error state.

use radon_canvas_api::{ApiError, CanvassApi, RadonResultsQuery, RequestSequence, RequestToken};
use radon_canvas_content::MapFallback;
use radon_canvas_map::{DEFAULT_CENTER, LatLng, MapOverlay, path_center};
use radon_canvas_models::{RadonMapPoint, TornadoPoint};

/// Where a dataset on the map came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Returned by the backend.
    Fetched,
    /// Backend failed; embedded samples shown instead.
    Fallback,
    /// Backend failed and no samples were available.
    Unavailable,
}

/// What the map route currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum MapState {
    Loading,
    Ready(MapOverlay),
    /// Both datasets failed. Retrying means loading again.
    Error(String),
}

/// State of the tornado map route.
#[derive(Debug)]
pub struct MapView {
    fallback: Option<MapFallback>,
    state: MapState,
    tornado_origin: DataOrigin,
    radon_origin: DataOrigin,
    sequence: RequestSequence,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(Some(radon_canvas_content::map_fallback()))
    }
}

impl MapView {
    /// Creates a view that substitutes `fallback` for failed fetches.
    #[must_use]
    pub fn new(fallback: Option<MapFallback>) -> Self {
        Self {
            fallback,
            state: MapState::Loading,
            tornado_origin: DataOrigin::Unavailable,
            radon_origin: DataOrigin::Unavailable,
            sequence: RequestSequence::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &MapState {
        &self.state
    }

    /// The rendered overlay, once loaded.
    #[must_use]
    pub const fn overlay(&self) -> Option<&MapOverlay> {
        match &self.state {
            MapState::Ready(overlay) => Some(overlay),
            MapState::Loading | MapState::Error(_) => None,
        }
    }

    /// Origin of the tornado path and of the radon results.
    #[must_use]
    pub const fn origins(&self) -> (DataOrigin, DataOrigin) {
        (self.tornado_origin, self.radon_origin)
    }

    /// Enters the loading state and starts a load, superseding any
    /// outstanding one.
    pub fn begin_load(&mut self) -> RequestToken {
        self.state = MapState::Loading;
        self.sequence.begin()
    }

    /// Applies both fetch outcomes if `token` is still current.
    pub fn finish_load(
        &mut self,
        token: RequestToken,
        path: Result<Vec<TornadoPoint>, ApiError>,
        results: Result<Vec<RadonMapPoint>, ApiError>,
    ) -> bool {
        if !self.sequence.is_current(token) {
            log::debug!("Discarding superseded map response");
            return false;
        }

        let mut first_error = None;

        let (path, center, tornado_origin) = match path {
            Ok(points) => {
                let center = path_center(&points);
                (points, center, DataOrigin::Fetched)
            }
            Err(e) => {
                log::error!("Failed to load tornado path: {e}");
                let (points, origin) = self.substitute(|f| &f.tornado_path, "tornado path");
                if origin == DataOrigin::Unavailable {
                    first_error = Some(e);
                }
                (points, DEFAULT_CENTER, origin)
            }
        };

        let (results, radon_origin) = match results {
            Ok(results) => (results, DataOrigin::Fetched),
            Err(e) => {
                log::error!("Failed to load radon test results: {e}");
                let (results, origin) = self.substitute(|f| &f.radon_results, "radon results");
                if origin == DataOrigin::Unavailable {
                    first_error = first_error.or(Some(e));
                }
                (results, origin)
            }
        };

        self.tornado_origin = tornado_origin;
        self.radon_origin = radon_origin;

        self.state = match first_error {
            Some(e)
                if tornado_origin == DataOrigin::Unavailable
                    && radon_origin == DataOrigin::Unavailable =>
            {
                MapState::Error(format!("Failed to load map data: {e}"))
            }
            _ => MapState::Ready(build(&path, &results, center)),
        };
        true
    }

    fn substitute<T: Clone>(
        &self,
        pick: impl Fn(&MapFallback) -> &Vec<T>,
        what: &str,
    ) -> (Vec<T>, DataOrigin) {
        self.fallback.as_ref().map_or_else(
            || (Vec::new(), DataOrigin::Unavailable),
            |fallback| {
                log::warn!("Using sample {what}");
                (pick(fallback).clone(), DataOrigin::Fallback)
            },
        )
    }

    /// Fetches both datasets and rebuilds the overlay. Also serves as the
    /// retry action from the error state.
    pub async fn load(&mut self, api: &dyn CanvassApi) -> &MapState {
        let token = self.begin_load();
        let query = RadonResultsQuery::all_results();
        let (path, results) = tokio::join!(api.tornado_path(), api.radon_results(&query));
        self.finish_load(token, path, results);
        &self.state
    }
}

fn build(path: &[TornadoPoint], results: &[RadonMapPoint], center: LatLng) -> MapOverlay {
    let overlay = MapOverlay::build(path, results, center);
    log::info!(
        "Map ready: {} path points, {} valid tests ({} elevated)",
        overlay.summary.tornado_points,
        overlay.summary.valid_tests,
        overlay.summary.high_count
    );
    overlay
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use radon_canvas_map::RadonClass;

    fn radon(level: f64) -> RadonMapPoint {
        RadonMapPoint {
            latitude: Some(38.65),
            longitude: Some(-90.22),
            final_result: Some(level),
            valid_test: "Y".to_string(),
            city: Some("St. Louis".to_string()),
            zip_code: None,
        }
    }

    #[tokio::test]
    async fn fetched_path_centres_the_map() {
        let api = FakeApi::with(|s| {
            s.tornado = Some(vec![TornadoPoint::new(38.6, -90.3), TornadoPoint::new(38.8, -90.1)]);
            s.radon = Some(vec![radon(4.1), radon(4.0)]);
        });
        let mut view = MapView::default();
        view.load(&api).await;

        let overlay = view.overlay().unwrap();
        assert!((overlay.center.latitude - 38.7).abs() < 1e-9);
        assert!((overlay.center.longitude + 90.2).abs() < 1e-9);
        assert_eq!(view.origins(), (DataOrigin::Fetched, DataOrigin::Fetched));
        assert_eq!(overlay.markers[0].class, RadonClass::High);
        assert_eq!(overlay.markers[1].class, RadonClass::Low);
        assert_eq!(
            api.state().radon_queries,
            [RadonResultsQuery {
                near_tornado: false,
                radius_miles: 2.0,
            }]
        );
    }

    #[tokio::test]
    async fn empty_path_uses_default_centre() {
        let api = FakeApi::with(|s| {
            s.tornado = Some(Vec::new());
            s.radon = Some(Vec::new());
        });
        let mut view = MapView::default();
        view.load(&api).await;

        let overlay = view.overlay().unwrap();
        assert_eq!(overlay.center, DEFAULT_CENTER);
        assert!(!overlay.has_data());
        assert!(overlay.summary.high_percent().abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn each_failure_falls_back_independently() {
        let api = FakeApi::with(|s| {
            s.tornado = None;
            s.radon = Some(vec![radon(7.0)]);
        });
        let mut view = MapView::default();
        view.load(&api).await;

        assert_eq!(view.origins(), (DataOrigin::Fallback, DataOrigin::Fetched));
        let overlay = view.overlay().unwrap();
        assert_eq!(overlay.center, DEFAULT_CENTER);
        assert_eq!(overlay.tornado_path.len(), 4);
        assert_eq!(overlay.markers.len(), 1);

        let api = FakeApi::with(|s| {
            s.tornado = Some(vec![TornadoPoint::new(38.6, -90.2)]);
            s.radon = None;
        });
        view.load(&api).await;
        assert_eq!(view.origins(), (DataOrigin::Fetched, DataOrigin::Fallback));
        assert_eq!(view.overlay().unwrap().summary.valid_tests, 28);
    }

    #[tokio::test]
    async fn both_failing_without_samples_is_an_error_until_retry() {
        let api = FakeApi::default();
        let mut view = MapView::new(None);

        assert!(matches!(view.load(&api).await, MapState::Error(_)));
        assert!(view.overlay().is_none());

        {
            let mut state = api.state();
            state.tornado = Some(vec![TornadoPoint::new(38.6, -90.2)]);
            state.radon = Some(vec![radon(2.0)]);
        }
        assert!(matches!(view.load(&api).await, MapState::Ready(_)));
    }

    #[tokio::test]
    async fn one_failure_without_samples_still_renders() {
        let api = FakeApi::with(|s| s.radon = Some(vec![radon(5.0)]));
        let mut view = MapView::new(None);
        view.load(&api).await;

        assert_eq!(view.origins(), (DataOrigin::Unavailable, DataOrigin::Fetched));
        let overlay = view.overlay().unwrap();
        assert!(overlay.tornado_path.is_empty());
        assert_eq!(overlay.markers.len(), 1);
    }

    #[test]
    fn superseded_load_is_discarded() {
        let mut view = MapView::new(None);
        let stale = view.begin_load();
        let fresh = view.begin_load();

        assert!(view.finish_load(fresh, Ok(Vec::new()), Ok(vec![radon(9.0)])));
        assert!(!view.finish_load(stale, Ok(Vec::new()), Ok(Vec::new())));
        assert_eq!(view.overlay().unwrap().markers.len(), 1);
    }
}
