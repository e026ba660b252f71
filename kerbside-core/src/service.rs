//! High-level service facade combining all providers.

use std::sync::Arc;

use crate::model::{AddressCandidate, Collection, CouncilId, Uprn};
use crate::plugin::PluginRegistry;
use crate::ports::{AddressQuery, PortError};
use crate::score::select_best;

/// Public entry point for resolving addresses and collection schedules.
pub struct KerbsideService {
    registry: Arc<PluginRegistry>,
}

impl KerbsideService {
    /// Create a new service bound to the provided registry.
    #[must_use]
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// List all available councils and their display names.
    #[must_use]
    pub fn councils(&self) -> Vec<(CouncilId, String)> {
        self.registry
            .councils()
            .into_iter()
            .map(|meta| (meta.id, meta.name))
            .collect()
    }

    /// Search for address candidates with the given council's provider.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the council is unsupported or the provider
    /// call fails.
    pub async fn search_addresses(
        &self,
        council: CouncilId,
        query: &AddressQuery,
    ) -> Result<Vec<AddressCandidate>, PortError> {
        let plugin = self.registry.plugin(&council)?;
        plugin.address_port.search(query).await
    }

    /// Load the collection schedule for an already-resolved property.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the council is unsupported, the provider
    /// request fails, or the schedule normalizes to zero records.
    pub async fn collections_for(
        &self,
        council: CouncilId,
        uprn: &Uprn,
    ) -> Result<Vec<Collection>, PortError> {
        let plugin = self.registry.plugin(&council)?;
        plugin.schedule_port.collections(uprn).await
    }

    /// Resolve address fragments all the way to a sorted, deduplicated
    /// collection schedule: search, disambiguate, fetch.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if any pipeline stage fails, including
    /// [`PortError::MissingUprn`] when the chosen candidate carries no
    /// property reference.
    pub async fn resolve_collections(
        &self,
        council: CouncilId,
        query: &AddressQuery,
    ) -> Result<Vec<Collection>, PortError> {
        let plugin = self.registry.plugin(&council)?;
        let candidates = plugin.address_port.search(query).await?;
        let selected = select_best(&candidates, query)?;
        let uprn = selected.uprn.clone().ok_or(PortError::MissingUprn)?;
        plugin.schedule_port.collections(&uprn).await
    }
}
