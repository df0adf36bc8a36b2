//! `reqwest`-backed implementation of [`CanvassApi`].

use async_trait::async_trait;
use radon_canvas_models::{
    Address, AddressCreate, AddressUpdate, ApiStatus, Neighborhood, NeighborhoodCreate,
    RadonMapPoint, RadonTestResult, TornadoPoint,
};
use reqwest::{Method, RequestBuilder, header};
use serde::de::DeserializeOwned;

use crate::{ApiError, CanvassApi, HotNeighborhoodsQuery, RadonResultsQuery};

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// HTTP client for the backend rooted at `base_url` (e.g.
/// `http://localhost:8000/api`).
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Creates a client for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header(header::CONTENT_TYPE, "application/json")
    }

    /// Sends a request and returns the body text of a 2xx response.
    async fn send(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let request = builder.build()?;
        let method = request.method().to_string();
        let url = request.url().to_string();
        log::debug!("{method} {url}");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                url,
                status,
            });
        }

        Ok(response.text().await?)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CanvassApi for HttpApi {
    async fn list_neighborhoods(&self) -> Result<Vec<Neighborhood>, ApiError> {
        self.send_json(self.request(Method::GET, "/neighborhoods"))
            .await
    }

    async fn create_neighborhood(
        &self,
        data: &NeighborhoodCreate,
    ) -> Result<Neighborhood, ApiError> {
        self.send_json(self.request(Method::POST, "/neighborhoods").json(data))
            .await
    }

    async fn update_neighborhood(
        &self,
        id: &str,
        data: &NeighborhoodCreate,
    ) -> Result<Neighborhood, ApiError> {
        self.send_json(
            self.request(Method::PUT, &format!("/neighborhoods/{id}"))
                .json(data),
        )
        .await
    }

    async fn delete_neighborhood(&self, id: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("/neighborhoods/{id}")))
            .await
            .map(|_| ())
    }

    async fn list_addresses(
        &self,
        neighborhood_id: Option<&str>,
    ) -> Result<Vec<Address>, ApiError> {
        let mut builder = self.request(Method::GET, "/addresses");
        if let Some(id) = neighborhood_id {
            builder = builder.query(&[("neighborhood_id", id)]);
        }
        self.send_json(builder).await
    }

    async fn create_address(&self, data: &AddressCreate) -> Result<Address, ApiError> {
        self.send_json(self.request(Method::POST, "/addresses").json(data))
            .await
    }

    async fn update_address(&self, id: &str, data: &AddressUpdate) -> Result<Address, ApiError> {
        self.send_json(
            self.request(Method::PUT, &format!("/addresses/{id}"))
                .json(data),
        )
        .await
    }

    async fn delete_address(&self, id: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("/addresses/{id}")))
            .await
            .map(|_| ())
    }

    async fn hot_neighborhoods(
        &self,
        query: &HotNeighborhoodsQuery,
    ) -> Result<Vec<RadonTestResult>, ApiError> {
        self.send_json(
            self.request(Method::GET, "/radon/hot-neighborhoods")
                .query(&query.pairs()),
        )
        .await
    }

    async fn tornado_path(&self) -> Result<Vec<TornadoPoint>, ApiError> {
        self.send_json(self.request(Method::GET, "/map/tornado-path"))
            .await
    }

    async fn radon_results(
        &self,
        query: &RadonResultsQuery,
    ) -> Result<Vec<RadonMapPoint>, ApiError> {
        self.send_json(
            self.request(Method::GET, "/map/radon-results")
                .query(&query.pairs()),
        )
        .await
    }

    async fn status(&self) -> Result<ApiStatus, ApiError> {
        self.send_json(self.request(Method::GET, "/status")).await
    }
}
