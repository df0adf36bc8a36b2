//! In-memory backend and scripted prompts for view tests.

use std::sync::Mutex;

use async_trait::async_trait;
use radon_canvas_api::{ApiError, CanvassApi, HotNeighborhoodsQuery, RadonResultsQuery};
use radon_canvas_models::{
    Address, AddressCreate, AddressStatus, AddressUpdate, ApiStatus, DataSourceStatus,
    Neighborhood, NeighborhoodCreate, RadonMapPoint, RadonTestResult, TornadoPoint, VisitStatus,
};

use crate::Interaction;

fn now() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn failure(method: &str, path: &str) -> ApiError {
    ApiError::Status {
        method: method.to_string(),
        url: format!("http://fake.test/api{path}"),
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn not_found(method: &str, path: &str) -> ApiError {
    ApiError::Status {
        method: method.to_string(),
        url: format!("http://fake.test/api{path}"),
        status: reqwest::StatusCode::NOT_FOUND,
    }
}

#[derive(Default)]
pub struct FakeState {
    pub neighborhoods: Vec<Neighborhood>,
    pub addresses: Vec<Address>,
    pub hot: Vec<RadonTestResult>,
    /// `None` makes the endpoint fail.
    pub tornado: Option<Vec<TornadoPoint>>,
    /// `None` makes the endpoint fail.
    pub radon: Option<Vec<RadonMapPoint>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub hot_queries: Vec<HotNeighborhoodsQuery>,
    pub address_queries: Vec<Option<String>>,
    pub radon_queries: Vec<RadonResultsQuery>,
    pub calls: usize,
}

/// Behaves like the canvassing backend: ids are `len + 1`, new addresses
/// start `not_visited`, the first non-`not_visited` update stamps
/// `visited_at`, and address listing honours `neighborhood_id`.
#[derive(Default)]
pub struct FakeApi {
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with(f: impl FnOnce(&mut FakeState)) -> Self {
        let api = Self::default();
        f(&mut api.state.lock().unwrap());
        api
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn read(&self, path: &str) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state();
        state.calls += 1;
        if state.fail_reads {
            return Err(failure("GET", path));
        }
        Ok(state)
    }

    fn write(
        &self,
        method: &str,
        path: &str,
    ) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state();
        state.calls += 1;
        if state.fail_writes {
            return Err(failure(method, path));
        }
        Ok(state)
    }
}

#[async_trait]
impl CanvassApi for FakeApi {
    async fn list_neighborhoods(&self) -> Result<Vec<Neighborhood>, ApiError> {
        Ok(self.read("/neighborhoods")?.neighborhoods.clone())
    }

    async fn create_neighborhood(
        &self,
        data: &NeighborhoodCreate,
    ) -> Result<Neighborhood, ApiError> {
        let mut state = self.write("POST", "/neighborhoods")?;
        let created = Neighborhood {
            id: (state.neighborhoods.len() + 1).to_string(),
            name: data.name.clone(),
            description: data.description.clone(),
            risk_level: data.risk_level,
            messaging_template: data.messaging_template.clone(),
            created_at: now(),
        };
        state.neighborhoods.push(created.clone());
        Ok(created)
    }

    async fn update_neighborhood(
        &self,
        id: &str,
        data: &NeighborhoodCreate,
    ) -> Result<Neighborhood, ApiError> {
        let path = format!("/neighborhoods/{id}");
        let mut state = self.write("PUT", &path)?;
        let existing = state
            .neighborhoods
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| not_found("PUT", &path))?;
        existing.name.clone_from(&data.name);
        existing.description.clone_from(&data.description);
        existing.risk_level = data.risk_level;
        existing
            .messaging_template
            .clone_from(&data.messaging_template);
        Ok(existing.clone())
    }

    async fn delete_neighborhood(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.write("DELETE", &format!("/neighborhoods/{id}"))?;
        state.neighborhoods.retain(|n| n.id != id);
        Ok(())
    }

    async fn list_addresses(
        &self,
        neighborhood_id: Option<&str>,
    ) -> Result<Vec<Address>, ApiError> {
        let mut state = self.read("/addresses")?;
        state
            .address_queries
            .push(neighborhood_id.map(ToString::to_string));
        Ok(state
            .addresses
            .iter()
            .filter(|a| {
                neighborhood_id
                    .filter(|id| !id.is_empty())
                    .is_none_or(|id| a.neighborhood_id.as_deref() == Some(id))
            })
            .cloned()
            .collect())
    }

    async fn create_address(&self, data: &AddressCreate) -> Result<Address, ApiError> {
        let mut state = self.write("POST", "/addresses")?;
        let created = Address {
            id: (state.addresses.len() + 1).to_string(),
            address: data.address.clone(),
            neighborhood_id: data.neighborhood_id.clone(),
            status: VisitStatus::NotVisited.into(),
            notes: None,
            visited_at: None,
            created_at: now(),
        };
        state.addresses.push(created.clone());
        Ok(created)
    }

    async fn update_address(&self, id: &str, data: &AddressUpdate) -> Result<Address, ApiError> {
        let path = format!("/addresses/{id}");
        let mut state = self.write("PUT", &path)?;
        let existing = state
            .addresses
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found("PUT", &path))?;
        if let Some(status) = &data.status {
            existing.status = status.clone();
        }
        if let Some(notes) = &data.notes {
            existing.notes = Some(notes.clone());
        }
        let not_visited = AddressStatus::from(VisitStatus::NotVisited);
        if data.status.as_ref() != Some(&not_visited) && existing.visited_at.is_none() {
            existing.visited_at = Some(now());
        }
        Ok(existing.clone())
    }

    async fn delete_address(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.write("DELETE", &format!("/addresses/{id}"))?;
        state.addresses.retain(|a| a.id != id);
        Ok(())
    }

    async fn hot_neighborhoods(
        &self,
        query: &HotNeighborhoodsQuery,
    ) -> Result<Vec<RadonTestResult>, ApiError> {
        let mut state = self.read("/radon/hot-neighborhoods")?;
        state.hot_queries.push(*query);
        Ok(state.hot.clone())
    }

    async fn tornado_path(&self) -> Result<Vec<TornadoPoint>, ApiError> {
        let mut state = self.state();
        state.calls += 1;
        state
            .tornado
            .clone()
            .ok_or_else(|| failure("GET", "/map/tornado-path"))
    }

    async fn radon_results(
        &self,
        query: &RadonResultsQuery,
    ) -> Result<Vec<RadonMapPoint>, ApiError> {
        let mut state = self.state();
        state.calls += 1;
        state.radon_queries.push(*query);
        state
            .radon
            .clone()
            .ok_or_else(|| failure("GET", "/map/radon-results"))
    }

    async fn status(&self) -> Result<ApiStatus, ApiError> {
        self.read("/status")?;
        Ok(ApiStatus {
            status: "ok".to_string(),
            data_source: DataSourceStatus {
                snowflake_enabled: false,
                snowflake_connected: false,
                using_sample_data: true,
                error: None,
            },
        })
    }
}

/// Answers every confirmation with `answer` and records alerts.
pub struct Scripted {
    pub answer: bool,
    pub confirms: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl Scripted {
    pub const fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirms: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }
}

impl Scripted {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Interaction for Scripted {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

pub fn neighborhood(id: &str, name: &str, risk: radon_canvas_models::RiskLevel) -> Neighborhood {
    Neighborhood {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        risk_level: risk,
        messaging_template: String::new(),
        created_at: "2024-05-19T09:00:00".to_string(),
    }
}

pub fn address(id: &str, street: &str, neighborhood_id: Option<&str>) -> Address {
    Address {
        id: id.to_string(),
        address: street.to_string(),
        neighborhood_id: neighborhood_id.map(ToString::to_string),
        status: AddressStatus::default(),
        notes: None,
        visited_at: None,
        created_at: "2024-05-19T09:00:00".to_string(),
    }
}
