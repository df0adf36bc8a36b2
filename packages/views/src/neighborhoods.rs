//! Neighborhood management: list, search, risk filter, and the
//! create / edit form.

use std::fmt;
use std::str::FromStr;

use radon_canvas_api::{CanvassApi, RequestSequence, RequestToken};
use radon_canvas_models::{Neighborhood, NeighborhoodCreate, RiskLevel, template_or_default};

use crate::{Interaction, ViewError, mutate, read_failed};

/// Risk level filter of the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RiskFilter {
    #[default]
    All,
    Level(RiskLevel),
}

impl RiskFilter {
    #[must_use]
    pub fn matches(self, level: RiskLevel) -> bool {
        match self {
            Self::All => true,
            Self::Level(wanted) => wanted == level,
        }
    }

    /// `All` followed by every risk level.
    #[must_use]
    pub fn choices() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(RiskLevel::all().iter().copied().map(Self::Level))
            .collect()
    }
}

impl fmt::Display for RiskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Level(level) => write!(f, "{level}"),
        }
    }
}

impl FromStr for RiskFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.to_ascii_lowercase().parse().map(Self::Level)
        }
    }
}

/// Buffer behind the add / edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborhoodForm {
    pub name: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub messaging_template: String,
}

impl NeighborhoodForm {
    /// Pre-fills the form from an existing record. The template is copied
    /// as stored, so a blank one stays blank unless the user replaces it.
    #[must_use]
    pub fn from_neighborhood(neighborhood: &Neighborhood) -> Self {
        Self {
            name: neighborhood.name.clone(),
            description: neighborhood.description.clone().unwrap_or_default(),
            risk_level: neighborhood.risk_level,
            messaging_template: neighborhood.messaging_template.clone(),
        }
    }

    /// Template as the form displays it. A blank buffer shows the default.
    #[must_use]
    pub fn displayed_template(&self) -> &str {
        template_or_default(&self.messaging_template)
    }

    /// Validates the buffer into a request payload.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Validation`] if the name is blank
    pub fn to_create(&self) -> Result<NeighborhoodCreate, ViewError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ViewError::validation("Neighborhood name is required"));
        }
        let description = self.description.trim();

        Ok(NeighborhoodCreate {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            risk_level: self.risk_level,
            messaging_template: self.messaging_template.clone(),
        })
    }
}

/// State of the neighborhoods route.
#[derive(Debug, Default)]
pub struct NeighborhoodsView {
    neighborhoods: Vec<Neighborhood>,
    /// Free-text search over name and description.
    pub search: String,
    pub risk_filter: RiskFilter,
    pub form: NeighborhoodForm,
    editing: Option<String>,
    sequence: RequestSequence,
}

impl NeighborhoodsView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every loaded neighborhood, in backend order.
    #[must_use]
    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    /// Neighborhoods passing both the search and the risk filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Neighborhood> {
        let needle = self.search.to_lowercase();
        self.neighborhoods
            .iter()
            .filter(|n| {
                let matches_search = n.name.to_lowercase().contains(&needle)
                    || n
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle));
                matches_search && self.risk_filter.matches(n.risk_level)
            })
            .collect()
    }

    /// e.g. `Showing 3 of 10 neighborhoods`.
    #[must_use]
    pub fn showing_label(&self) -> String {
        format!(
            "Showing {} of {} neighborhoods",
            self.visible().len(),
            self.neighborhoods.len()
        )
    }

    /// Message for an empty list, or `None` when something is visible.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.neighborhoods.is_empty() {
            Some("No neighborhoods defined yet")
        } else if self.visible().is_empty() {
            Some("No neighborhoods found")
        } else {
            None
        }
    }

    /// Id of the record the form is editing, `None` when adding.
    #[must_use]
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Opens the form on an existing record. Returns `false` if `id` is not
    /// loaded.
    pub fn edit(&mut self, id: &str) -> bool {
        let Some(neighborhood) = self.neighborhoods.iter().find(|n| n.id == id) else {
            return false;
        };
        self.form = NeighborhoodForm::from_neighborhood(neighborhood);
        self.editing = Some(neighborhood.id.clone());
        true
    }

    /// Closes the form, discarding the buffer.
    pub fn cancel(&mut self) {
        self.form = NeighborhoodForm::default();
        self.editing = None;
    }

    /// Starts a fetch, superseding any outstanding one.
    pub fn begin_load(&self) -> RequestToken {
        self.sequence.begin()
    }

    /// Applies a fetched list if `token` is still current.
    pub fn finish_load(&mut self, token: RequestToken, neighborhoods: Vec<Neighborhood>) -> bool {
        if !self.sequence.is_current(token) {
            log::debug!("Discarding superseded neighborhoods response");
            return false;
        }
        self.neighborhoods = neighborhoods;
        true
    }

    /// Fetches the full list.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Api`] if the request fails; the previous list is kept
    pub async fn load(&mut self, api: &dyn CanvassApi) -> Result<(), ViewError> {
        let token = self.begin_load();
        let neighborhoods = api
            .list_neighborhoods()
            .await
            .map_err(|e| read_failed("neighborhoods", e))?;
        if self.finish_load(token, neighborhoods) {
            log::info!("Loaded {} neighborhoods", self.neighborhoods.len());
        }
        Ok(())
    }

    /// Creates or updates from the form, then reloads.
    ///
    /// # Errors
    ///
    /// * [`ViewError::Validation`] if the form is incomplete
    /// * [`ViewError::Api`] if the save fails; the user has been alerted
    pub async fn submit(
        &mut self,
        api: &dyn CanvassApi,
        ui: &dyn Interaction,
    ) -> Result<Neighborhood, ViewError> {
        let data = self.form.to_create()?;
        let saved = mutate(
            ui,
            "save neighborhood",
            "Failed to save neighborhood. Please try again.",
            async {
                match &self.editing {
                    Some(id) => api.update_neighborhood(id, &data).await,
                    None => api.create_neighborhood(&data).await,
                }
            },
        )
        .await?;
        log::info!("Saved neighborhood {} ({})", saved.name, saved.id);

        self.cancel();
        self.reload_after_write(api).await;
        Ok(saved)
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
        if !ui.confirm("Are you sure you want to delete this neighborhood?") {
            return Ok(false);
        }
        mutate(
            ui,
            "delete neighborhood",
            "Failed to delete neighborhood. Please try again.",
            api.delete_neighborhood(id),
        )
        .await?;
        log::info!("Deleted neighborhood {id}");

        self.reload_after_write(api).await;
        Ok(true)
    }

    async fn reload_after_write(&mut self, api: &dyn CanvassApi) {
        // Already logged; the write itself succeeded.
        let _ = self.load(api).await;
    }
}
