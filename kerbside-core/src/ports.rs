//! Traits describing provider capabilities and shared helper types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{AddressCandidate, Collection, CouncilMeta, Uprn};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while resolving an address or its schedule.
pub enum PortError {
    /// Network layer failed or the backend answered with a non-success status.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Every search attempt came back without a usable address list.
    #[error("No matching addresses were returned by the API")]
    LookupExhausted,
    /// A search answered, but with an empty candidate list.
    #[error("Address lookup returned no results")]
    NoCandidates,
    /// The chosen candidate does not expose a property reference.
    #[error("Selected address does not expose a UPRN")]
    MissingUprn,
    /// The schedule payload normalized to zero records.
    #[error("No collection data returned for the selected address")]
    EmptySchedule,
    /// The council has no registered plugin.
    #[error("Unsupported council")]
    UnsupportedCouncil,
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Default)]
/// User-supplied address fragments driving one resolution attempt.
pub struct AddressQuery {
    house: Option<String>,
    street: Option<String>,
    town: Option<String>,
    postcode: Option<String>,
}

impl AddressQuery {
    /// Construct a new query from optional free-text fragments.
    #[must_use]
    pub fn new(
        house: Option<String>,
        street: Option<String>,
        town: Option<String>,
        postcode: Option<String>,
    ) -> Self {
        Self {
            house,
            street,
            town,
            postcode,
        }
    }

    /// House number or name fragment, trimmed; `None` when blank.
    #[must_use]
    pub fn house(&self) -> Option<&str> {
        fragment(self.house.as_deref())
    }

    /// Street fragment, trimmed; `None` when blank.
    #[must_use]
    pub fn street(&self) -> Option<&str> {
        fragment(self.street.as_deref())
    }

    /// Town fragment, trimmed; `None` when blank.
    #[must_use]
    pub fn town(&self) -> Option<&str> {
        fragment(self.town.as_deref())
    }

    /// Postcode fragment as supplied, trimmed; `None` when blank.
    #[must_use]
    pub fn postcode(&self) -> Option<&str> {
        fragment(self.postcode.as_deref())
    }

    /// Check whether every fragment is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.house().is_none()
            && self.street().is_none()
            && self.town().is_none()
            && self.postcode().is_none()
    }

    /// All non-blank fragments joined into one broad query line.
    #[must_use]
    pub fn full_query(&self) -> String {
        join(&[self.house(), self.street(), self.town(), self.postcode()])
    }

    /// House number and street joined into a narrow query line.
    #[must_use]
    pub fn street_line(&self) -> String {
        join(&[self.house(), self.street()])
    }
}

fn fragment(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn join(parts: &[Option<&str>]) -> String {
    parts.iter().flatten().copied().collect::<Vec<_>>().join(" ")
}

#[async_trait]
/// Trait for provider-specific address search backends.
pub trait AddressPort: Send + Sync {
    /// Metadata describing the council handled by this port.
    fn council(&self) -> &CouncilMeta;

    /// Run the provider's search strategies for the supplied fragments and
    /// return the raw candidate list of the first strategy that answers.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when every strategy comes back without an
    /// address list or the backend request fails.
    async fn search(&self, query: &AddressQuery) -> Result<Vec<AddressCandidate>, PortError>;
}

#[async_trait]
/// Trait for provider-specific collection schedule backends.
pub trait SchedulePort: Send + Sync {
    /// Metadata describing the council handled by this port.
    fn council(&self) -> &CouncilMeta;

    /// Fetch and normalize the collection schedule for a resolved property.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the schedule
    /// normalizes to zero records.
    async fn collections(&self, uprn: &Uprn) -> Result<Vec<Collection>, PortError>;
}
