//! Server-ranked radon aggregates per neighborhood.

use radon_canvas_api::{CanvassApi, HotNeighborhoodsQuery, RequestSequence, RequestToken};
use radon_canvas_models::{HotNeighborhoodSort, Neighborhood, RadonRiskTier, RadonTestResult};

use crate::{ViewError, fetch_neighborhoods, read_failed};

/// Lowest accepted minimum-test count.
pub const MIN_TESTS_FLOOR: u32 = 1;

/// Finds the locally defined neighborhood an aggregate row refers to.
///
/// Names match when either contains the other, ignoring case. The first
/// match in list order wins.
#[must_use]
pub fn match_neighborhood<'a>(
    name: &str,
    neighborhoods: &'a [Neighborhood],
) -> Option<&'a Neighborhood> {
    let name = name.to_lowercase();
    neighborhoods.iter().find(|n| {
        let local = n.name.to_lowercase();
        local.contains(&name) || name.contains(&local)
    })
}

/// Parses user input for the minimum test count. Anything that is not a
/// number of at least one becomes one.
#[must_use]
pub fn parse_min_tests(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .map_or(MIN_TESTS_FLOOR, |n| n.max(MIN_TESTS_FLOOR))
}

/// One rendered row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedNeighborhood<'a> {
    /// 1-based position in server order.
    pub rank: usize,
    pub result: &'a RadonTestResult,
    pub tier: &'static RadonRiskTier,
    /// Matching local neighborhood, if any.
    pub linked: Option<&'a Neighborhood>,
}

/// State of the hot-neighborhoods route.
#[derive(Debug, Default)]
pub struct HotNeighborhoodsView {
    results: Vec<RadonTestResult>,
    neighborhoods: Vec<Neighborhood>,
    query: HotNeighborhoodsQuery,
    loading: bool,
    sequence: RequestSequence,
}

impl HotNeighborhoodsView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn query(&self) -> HotNeighborhoodsQuery {
        self.query
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_min_tests(&mut self, min_tests: u32) {
        self.query.min_tests = min_tests.max(MIN_TESTS_FLOOR);
    }

    pub const fn set_sort(&mut self, sort_by: HotNeighborhoodSort) {
        self.query.sort_by = sort_by;
    }

    /// Rows in server order, ranked and linked.
    #[must_use]
    pub fn rows(&self) -> Vec<RankedNeighborhood<'_>> {
        self.results
            .iter()
            .enumerate()
            .map(|(i, result)| RankedNeighborhood {
                rank: i + 1,
                result,
                tier: result.risk_tier(),
                linked: match_neighborhood(&result.neighborhood, &self.neighborhoods),
            })
            .collect()
    }

    /// Starts a fetch for the current query, superseding any outstanding
    /// one.
    pub fn begin_fetch(&mut self) -> (RequestToken, HotNeighborhoodsQuery) {
        self.loading = true;
        (self.sequence.begin(), self.query)
    }

    /// Applies a response if `token` is still current.
    pub fn finish_fetch(
        &mut self,
        token: RequestToken,
        results: Result<Vec<RadonTestResult>, ViewError>,
    ) -> Result<bool, ViewError> {
        if !self.sequence.is_current(token) {
            log::debug!("Discarding superseded hot neighborhoods response");
            return Ok(false);
        }
        self.loading = false;
        self.results = results?;
        log::info!("Loaded {} hot neighborhoods", self.results.len());
        Ok(true)
    }

    /// Requests aggregates for `query` without touching any view.
    ///
    /// Pair with [`Self::begin_fetch`] and [`Self::finish_fetch`] to keep
    /// the view free while the request is outstanding.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Api`] if the request fails
    pub async fn fetch(
        api: &dyn CanvassApi,
        query: HotNeighborhoodsQuery,
    ) -> Result<Vec<RadonTestResult>, ViewError> {
        log::debug!(
            "Requesting hot neighborhoods (minTests={}, sortBy={})",
            query.min_tests,
            query.sort_by
        );
        api.hot_neighborhoods(&query)
            .await
            .map_err(|e| read_failed("radon data", e))
    }

    /// Fetches aggregates for the current query.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Api`] if the request fails; previous rows are kept
    pub async fn load_results(&mut self, api: &dyn CanvassApi) -> Result<(), ViewError> {
        let (token, query) = self.begin_fetch();
        let results = Self::fetch(api, query).await;
        self.finish_fetch(token, results).map(|_| ())
    }

    /// Loads the local neighborhoods used for linking, then the aggregates.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Api`] if either request fails
    pub async fn load(&mut self, api: &dyn CanvassApi) -> Result<(), ViewError> {
        let neighborhoods = fetch_neighborhoods(api).await;
        if let Ok(neighborhoods) = &neighborhoods {
            self.neighborhoods.clone_from(neighborhoods);
        }
        let results = self.load_results(api).await;
        neighborhoods.and(results)
    }
}
