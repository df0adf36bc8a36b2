#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View state for each route of the radon canvas client.
//!
//! A view owns the data it rendered last, its filter and form buffers, and
//! the fetch / mutate / re-fetch cycle against a [`CanvassApi`]. Views
//! know nothing about terminals; blocking prompts go through
//! [`Interaction`] so the front end decides how to ask.
//!
//! Every fetch takes a [`RequestToken`](radon_canvas_api::RequestToken)
//! from the view's own [`RequestSequence`](radon_canvas_api::RequestSequence)
//! and the response is applied only if no newer fetch was started since.

pub mod addresses;
pub mod hot_neighborhoods;
pub mod library;
pub mod map;
pub mod neighborhoods;
pub mod reference;

#[cfg(test)]
mod testing;

use radon_canvas_api::{ApiError, CanvassApi};

pub use addresses::{AddressFilter, AddressForm, AddressesView, CheckIn};
pub use hot_neighborhoods::{HotNeighborhoodsView, RankedNeighborhood, match_neighborhood};
pub use library::{SolutionsView, SourcesView};
pub use map::{DataOrigin, MapState, MapView};
pub use neighborhoods::{NeighborhoodForm, NeighborhoodsView, RiskFilter};
pub use reference::{FilterCategory, ReferenceSort, ReferenceView, map_search_url};

/// Errors surfaced by view operations.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The form is not complete enough to submit.
    #[error("{message}")]
    Validation {
        /// What is missing.
        message: String,
    },
}

impl ViewError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Blocking user prompts a view may need while handling an action.
pub trait Interaction: Send + Sync {
    /// Asks a yes/no question. `false` aborts the action.
    fn confirm(&self, message: &str) -> bool;

    /// Shows a notice the user must acknowledge.
    fn alert(&self, message: &str);
}

/// Runs a mutation; on failure logs it and shows `alert` to the user.
async fn mutate<T, F>(
    ui: &dyn Interaction,
    what: &str,
    alert: &str,
    call: F,
) -> Result<T, ViewError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match call.await {
        Ok(value) => Ok(value),
        Err(e) => {
            log::error!("Failed to {what}: {e}");
            ui.alert(alert);
            Err(e.into())
        }
    }
}

/// Logs a failed read. The view keeps showing its previous data.
fn read_failed(what: &str, e: ApiError) -> ViewError {
    log::error!("Failed to load {what}: {e}");
    e.into()
}

/// Fetches the neighborhood list for views that only need it for lookup.
async fn fetch_neighborhoods(
    api: &dyn CanvassApi,
) -> Result<Vec<radon_canvas_models::Neighborhood>, ViewError> {
    api.list_neighborhoods()
        .await
        .map_err(|e| read_failed("neighborhoods", e))
}
