//! Provider implementation for North Herts Council using the Cloud 9
//! citizen-services API.

mod dates;
mod headers;
mod schedule;
mod search;
mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use kerbside_core::{
    model::{AddressCandidate, Collection, CouncilMeta, Councils, Uprn},
    plugin::CouncilPlugin,
    ports::{AddressPort, AddressQuery, PortError, SchedulePort},
};

use crate::types::AddressesResponse;

const API_DOMAIN: &str = "https://apps.cloud9technologies.com";
const API_BASE: &str = "/citizenmobile/mobileapi";
const AUTHORITY: &str = "northherts";
const ADDRESSES_PATH: &str = "/addresses";
const WASTE_PATH: &str = "/wastecollections";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Address search implementation for North Herts.
pub struct NorthHertsAddressPort {
    client: Client,
    base_url: String,
    meta: CouncilMeta,
}

impl NorthHertsAddressPort {
    /// Create a new address port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, API_DOMAIN)
    }

    /// Create a port against a custom base URL, for tests that point at a
    /// mock server.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            meta: council_meta(),
        }
    }

    fn addresses_url(&self) -> String {
        format!(
            "{}/{AUTHORITY}{API_BASE}{ADDRESSES_PATH}",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl AddressPort for NorthHertsAddressPort {
    fn council(&self) -> &CouncilMeta {
        &self.meta
    }

    async fn search(&self, query: &AddressQuery) -> Result<Vec<AddressCandidate>, PortError> {
        let url = self.addresses_url();

        // Attempts run strictly in priority order; the first response that
        // carries an address list wins, even when that list is empty.
        for (param, text) in search::search_attempts(query) {
            debug!(
                param = param.as_str(),
                text = text.as_str(),
                "address lookup attempt"
            );

            let request = self
                .client
                .get(&url)
                .headers(headers::base_headers())
                .query(&[(param.as_str(), text.as_str())])
                .timeout(REQUEST_TIMEOUT);

            let response = fetch_json::<AddressesResponse>(request).await?;

            if let Some(records) = response.addresses {
                debug!(candidates = records.len(), "address lookup answered");
                return Ok(records
                    .into_iter()
                    .map(|record| record.into_candidate(self.meta.id.clone()))
                    .collect());
            }
        }

        Err(PortError::LookupExhausted)
    }
}

/// Collection schedule implementation for North Herts.
pub struct NorthHertsSchedulePort {
    client: Client,
    base_url: String,
    meta: CouncilMeta,
}

impl NorthHertsSchedulePort {
    /// Create a new schedule port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, API_DOMAIN)
    }

    /// Create a port against a custom base URL, for tests that point at a
    /// mock server.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            meta: council_meta(),
        }
    }

    fn waste_url(&self, uprn: &Uprn) -> String {
        format!(
            "{}/{AUTHORITY}{API_BASE}{WASTE_PATH}/{uprn}",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SchedulePort for NorthHertsSchedulePort {
    fn council(&self) -> &CouncilMeta {
        &self.meta
    }

    async fn collections(&self, uprn: &Uprn) -> Result<Vec<Collection>, PortError> {
        let request = self
            .client
            .get(self.waste_url(uprn))
            .headers(headers::base_headers())
            .timeout(REQUEST_TIMEOUT);

        let payload = fetch_json::<Value>(request).await?;

        let collections = schedule::build_collections(&payload);
        if collections.is_empty() {
            return Err(PortError::EmptySchedule);
        }
        Ok(collections)
    }
}

/// Build the plugin bundle for the North Herts provider.
#[must_use]
pub fn plugin(client: Client) -> CouncilPlugin {
    plugin_with_base_url(client, API_DOMAIN)
}

/// Build the plugin bundle against a custom base URL, for tests that point
/// at a mock server.
#[must_use]
pub fn plugin_with_base_url(client: Client, base_url: &str) -> CouncilPlugin {
    let address_port = Arc::new(NorthHertsAddressPort::with_base_url(
        client.clone(),
        base_url,
    ));
    let schedule_port = Arc::new(NorthHertsSchedulePort::with_base_url(client, base_url));

    CouncilPlugin {
        meta: council_meta(),
        address_port,
        schedule_port,
    }
}

fn council_meta() -> CouncilMeta {
    CouncilMeta {
        id: Councils::NorthHerts.into(),
        name: String::from("North Herts Council"),
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
