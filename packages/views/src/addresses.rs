//! Household list, the add form, and the check-in flow.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use radon_canvas_api::{CanvassApi, RequestSequence, RequestToken};
use radon_canvas_models::{
    Address, AddressCreate, AddressStatus, AddressUpdate, GENERIC_CHECK_IN_MESSAGE, Neighborhood,
};

use crate::{Interaction, ViewError, fetch_neighborhoods, mutate, read_failed};

/// Which addresses the list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AddressFilter {
    #[default]
    All,
    /// Addresses without a neighborhood.
    Unassigned,
    /// Addresses of one neighborhood, by id.
    Neighborhood(String),
}

impl AddressFilter {
    /// The `neighborhood_id` query parameter to send for this filter.
    ///
    /// `Unassigned` is resolved client-side over the full list.
    #[must_use]
    pub fn query_id(&self) -> Option<&str> {
        match self {
            Self::All | Self::Unassigned => None,
            Self::Neighborhood(id) => Some(id.as_str()),
        }
    }

    #[must_use]
    pub fn matches(&self, address: &Address) -> bool {
        match self {
            Self::All => true,
            Self::Unassigned => address.is_unassigned(),
            Self::Neighborhood(id) => address.neighborhood_id.as_deref() == Some(id.as_str()),
        }
    }
}

impl fmt::Display for AddressFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Unassigned => f.write_str("unassigned"),
            Self::Neighborhood(id) => f.write_str(id),
        }
    }
}

impl FromStr for AddressFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "all" => Self::All,
            "unassigned" => Self::Unassigned,
            id => Self::Neighborhood(id.to_string()),
        })
    }
}

/// Buffer behind the add-address form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub address: String,
    /// Selected neighborhood id; blank means unassigned.
    pub neighborhood_id: String,
}

impl AddressForm {
    /// Validates the buffer into a request payload.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Validation`] if the address is blank
    pub fn to_create(&self) -> Result<AddressCreate, ViewError> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(ViewError::validation("Address is required"));
        }
        let neighborhood_id = self.neighborhood_id.trim();

        Ok(AddressCreate {
            address: address.to_string(),
            neighborhood_id: (!neighborhood_id.is_empty()).then(|| neighborhood_id.to_string()),
        })
    }
}

/// An open check-in for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    pub address: Address,
    /// The address's neighborhood, if it resolves.
    pub neighborhood: Option<Neighborhood>,
    pub status: AddressStatus,
    pub notes: String,
}

impl CheckIn {
    #[must_use]
    pub fn new(address: Address, neighborhood: Option<Neighborhood>) -> Self {
        Self {
            status: address.status.clone(),
            notes: address.notes.clone().unwrap_or_default(),
            address,
            neighborhood,
        }
    }

    /// The script to read at the door.
    #[must_use]
    pub fn template(&self) -> &str {
        self.neighborhood
            .as_ref()
            .map_or(GENERIC_CHECK_IN_MESSAGE, Neighborhood::effective_template)
    }

    /// Heading above the template when the neighborhood is known.
    #[must_use]
    pub fn template_heading(&self) -> Option<String> {
        self.neighborhood
            .as_ref()
            .map(|n| format!("{} - Optimized Message Template:", n.name))
    }

    /// The update to send. Blank notes keep whatever was recorded before.
    #[must_use]
    pub fn to_update(&self) -> AddressUpdate {
        let notes = if self.notes.trim().is_empty() {
            self.address.notes.clone()
        } else {
            Some(self.notes.clone())
        };
        AddressUpdate {
            status: Some(self.status.clone()),
            notes,
        }
    }
}

/// State of the addresses route.
#[derive(Debug, Default)]
pub struct AddressesView {
    addresses: Vec<Address>,
    neighborhoods: Vec<Neighborhood>,
    filter: AddressFilter,
    pub form: AddressForm,
    check_in: Option<CheckIn>,
    sequence: RequestSequence,
}

impl AddressesView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn filter(&self) -> &AddressFilter {
        &self.filter
    }

    /// Neighborhoods available for the filter and the form.
    #[must_use]
    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    /// Addresses passing the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Address> {
        self.addresses
            .iter()
            .filter(|a| self.filter.matches(a))
            .collect()
    }

    /// Display name for a neighborhood reference.
    #[must_use]
    pub fn neighborhood_name(&self, neighborhood_id: Option<&str>) -> &str {
        match neighborhood_id.filter(|id| !id.is_empty()) {
            None => "Unassigned",
            Some(id) => self
                .find_neighborhood(id)
                .map_or("Unknown", |n| n.name.as_str()),
        }
    }

    fn find_neighborhood(&self, id: &str) -> Option<&Neighborhood> {
        self.neighborhoods.iter().find(|n| n.id == id)
    }

    /// Heading and hint for an empty list, or `None` when something is
    /// visible.
    #[must_use]
    pub fn empty_message(&self) -> Option<(&'static str, &'static str)> {
        if !self.visible().is_empty() {
            return None;
        }
        let hint = if self.filter == AddressFilter::All {
            "Add your first address to get started."
        } else {
            "No addresses match this filter."
        };
        Some(("No addresses found", hint))
    }

    /// Loads neighborhoods and addresses.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Api`] if either request fails
    pub async fn load(&mut self, api: &dyn CanvassApi) -> Result<(), ViewError> {
        let neighborhoods = fetch_neighborhoods(api).await;
        if let Ok(neighborhoods) = &neighborhoods {
            self.neighborhoods.clone_from(neighborhoods);
        }
        let addresses = self.load_addresses(api).await;
        neighborhoods.and(addresses)
    }

    /// Starts an address fetch, superseding any outstanding one.
    pub fn begin_load(&self) -> RequestToken {
        self.sequence.begin()
    }

    /// Applies fetched addresses if `token` is still current.
    pub fn finish_load(&mut self, token: RequestToken, addresses: Vec<Address>) -> bool {
        if !self.sequence.is_current(token) {
            log::debug!("Discarding superseded addresses response");
            return false;
        }
        self.addresses = addresses;
        true
    }

    /// Fetches addresses for the current filter.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Api`] if the request fails; the previous list is kept
    pub async fn load_addresses(&mut self, api: &dyn CanvassApi) -> Result<(), ViewError> {
        let token = self.begin_load();
        let addresses = api
            .list_addresses(self.filter.query_id())
            .await
            .map_err(|e| read_failed("addresses", e))?;
        if self.finish_load(token, addresses) {
            log::info!(
                "Loaded {} addresses (filter: {})",
                self.addresses.len(),
                self.filter
            );
        }
        Ok(())
    }

    /// Changes the filter and re-fetches.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Api`] if the request fails
    pub async fn set_filter(
        &mut self,
        api: &dyn CanvassApi,
        filter: AddressFilter,
    ) -> Result<(), ViewError> {
        self.filter = filter;
        self.load_addresses(api).await
    }

    /// Creates an address from the form, then reloads.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Validation`] if the address is blank
    /// * [`ViewError::Api`] if the save fails; the user has been alerted
    pub async fn add(
        &mut self,
        api: &dyn CanvassApi,
        ui: &dyn Interaction,
    ) -> Result<Address, ViewError> {
        let data = self.form.to_create()?;
        let created = mutate(
            ui,
            "add address",
            "Failed to add address. Please try again.",
            api.create_address(&data),
        )
        .await?;
        log::info!("Added address {} ({})", created.address, created.id);

        self.form = AddressForm::default();
        self.reload_after_write(api).await;
        Ok(created)
    }

    /// Opens the check-in for `id`. Returns `false` if it is not loaded.
    pub fn begin_check_in(&mut self, id: &str) -> bool {
        let Some(address) = self.addresses.iter().find(|a| a.id == id).cloned() else {
            return false;
        };
        let neighborhood = address
            .neighborhood_id
            .as_deref()
            .and_then(|nid| self.find_neighborhood(nid))
            .cloned();
        self.check_in = Some(CheckIn::new(address, neighborhood));
        true
    }

    #[must_use]
    pub const fn check_in(&self) -> Option<&CheckIn> {
        self.check_in.as_ref()
    }

    pub const fn check_in_mut(&mut self) -> Option<&mut CheckIn> {
        self.check_in.as_mut()
    }

    pub fn cancel_check_in(&mut self) {
        self.check_in = None;
    }

    /// Persists the open check-in, closes it, and reloads. Returns `None`
    /// when no check-in is open.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Api`] if the save fails; the user has been alerted and
    ///   the check-in stays open
    pub async fn save_check_in(
        &mut self,
        api: &dyn CanvassApi,
        ui: &dyn Interaction,
    ) -> Result<Option<Address>, ViewError> {
        let Some(check_in) = &self.check_in else {
            return Ok(None);
        };
        let update = check_in.to_update();
        let id = check_in.address.id.clone();

        let updated = mutate(
            ui,
            "update address",
            "Failed to update address. Please try again.",
            api.update_address(&id, &update),
        )
        .await?;
        log::info!(
            "Checked in at {}: {}",
            updated.address,
            updated.status.label()
        );

        self.check_in = None;
        self.reload_after_write(api).await;
        Ok(Some(updated))
    }

    /// Deletes after confirmation, then reloads. Returns `false` if the user
    /// declined.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Api`] if the delete fails; the user has been alerted
    pub async fn delete(
        &mut self,
        api: &dyn CanvassApi,
        ui: &dyn Interaction,
        id: &str,
    ) -> Result<bool, ViewError> {
        if !ui.confirm("Are you sure you want to delete this address?") {
            return Ok(false);
        }
        mutate(
            ui,
            "delete address",
            "Failed to delete address. Please try again.",
            api.delete_address(id),
        )
        .await?;
        log::info!("Deleted address {id}");

        self.reload_after_write(api).await;
        Ok(true)
    }

    async fn reload_after_write(&mut self, api: &dyn CanvassApi) {
        let _ = self.load_addresses(api).await;
    }
}
