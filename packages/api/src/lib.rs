#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client for the radon canvas REST API.
//!
//! The [`CanvassApi`] trait is the seam every view talks through. The
//! production implementation is [`HttpApi`], a stateless pass-through to
//! the backend: one request per call, no retries, no caching. Any non-2xx
//! response becomes an [`ApiError::Status`].

mod http;
pub mod query;
pub mod sequence;

use async_trait::async_trait;
use radon_canvas_models::{
    Address, AddressCreate, AddressUpdate, ApiStatus, Neighborhood, NeighborhoodCreate,
    RadonMapPoint, RadonTestResult, TornadoPoint,
};

pub use http::{DEFAULT_API_URL, HttpApi};
pub use query::{HotNeighborhoodsQuery, RadonResultsQuery};
pub use sequence::{RequestSequence, RequestToken};

/// Errors that can occur while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("{method} {url} returned {status}")]
    Status {
        /// Request method.
        method: String,
        /// Request URL.
        url: String,
        /// Response status.
        status: reqwest::StatusCode,
    },

    /// The response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every backend operation the client uses.
#[async_trait]
pub trait CanvassApi: Send + Sync {
    /// `GET /neighborhoods`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn list_neighborhoods(&self) -> Result<Vec<Neighborhood>, ApiError>;

    /// `POST /neighborhoods`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn create_neighborhood(&self, data: &NeighborhoodCreate)
    -> Result<Neighborhood, ApiError>;

    /// `PUT /neighborhoods/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn update_neighborhood(
        &self,
        id: &str,
        data: &NeighborhoodCreate,
    ) -> Result<Neighborhood, ApiError>;

    /// `DELETE /neighborhoods/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn delete_neighborhood(&self, id: &str) -> Result<(), ApiError>;

    /// `GET /addresses`, optionally restricted to one neighborhood.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn list_addresses(&self, neighborhood_id: Option<&str>)
    -> Result<Vec<Address>, ApiError>;

    /// `POST /addresses`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn create_address(&self, data: &AddressCreate) -> Result<Address, ApiError>;

    /// `PUT /addresses/{id}` with a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn update_address(&self, id: &str, data: &AddressUpdate) -> Result<Address, ApiError>;

    /// `DELETE /addresses/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn delete_address(&self, id: &str) -> Result<(), ApiError>;

    /// `GET /radon/hot-neighborhoods`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn hot_neighborhoods(
        &self,
        query: &HotNeighborhoodsQuery,
    ) -> Result<Vec<RadonTestResult>, ApiError>;

    /// `GET /map/tornado-path`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn tornado_path(&self) -> Result<Vec<TornadoPoint>, ApiError>;

    /// `GET /map/radon-results`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn radon_results(&self, query: &RadonResultsQuery)
    -> Result<Vec<RadonMapPoint>, ApiError>;

    /// `GET /status`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn status(&self) -> Result<ApiStatus, ApiError>;
}
