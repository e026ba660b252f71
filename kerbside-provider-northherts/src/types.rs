//! Wire types for the Cloud 9 address search.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use kerbside_core::model::{AddressCandidate, CouncilId, Uprn};

/// Response envelope from the `/addresses` endpoint.
///
/// `addresses` stays `None` when the backend answered without a list at
/// all, which tells the fallback chain to move on to its next attempt. An
/// empty list is a real (if unusable) answer and stops the chain.
#[derive(Debug, Deserialize)]
pub(crate) struct AddressesResponse {
    #[serde(default, deserialize_with = "list_or_none")]
    pub(crate) addresses: Option<Vec<AddressRecord>>,
}

// Only an actual list counts as an answer; any other shape under the
// `addresses` key is treated as no list at all.
fn list_or_none<'de, D>(deserializer: D) -> Result<Option<Vec<AddressRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        Some(Value::Array(entries)) => Ok(Some(
            entries
                .into_iter()
                .map(|entry| serde_json::from_value(entry).unwrap_or_default())
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// One raw address record. No field is guaranteed to be present; every
/// read is defensive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct AddressRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub(crate) uprn: Option<String>,
    pub(crate) full_address: Option<String>,
    pub(crate) single_line_address: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) address_line1: Option<String>,
    pub(crate) address_line2: Option<String>,
    pub(crate) address_line3: Option<String>,
    pub(crate) town: Option<String>,
    pub(crate) building_name: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub(crate) building_number: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub(crate) property_number: Option<String>,
    pub(crate) street: Option<String>,
    pub(crate) postcode: Option<String>,
}

impl AddressRecord {
    /// Concatenate every populated field into the single-line form used for
    /// scoring and display, full-address fields before structural ones,
    /// locality before postcode.
    pub(crate) fn single_line(&self) -> String {
        [
            &self.full_address,
            &self.single_line_address,
            &self.address,
            &self.address_line1,
            &self.address_line2,
            &self.address_line3,
            &self.town,
            &self.building_name,
            &self.building_number,
            &self.property_number,
            &self.street,
            &self.postcode,
        ]
        .into_iter()
        .flatten()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Convert the raw record into the provider-neutral candidate shape.
    pub(crate) fn into_candidate(self, council: CouncilId) -> AddressCandidate {
        let text = self.single_line();
        let uprn = self
            .uprn
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Uprn(value.to_owned()));
        AddressCandidate {
            uprn,
            council,
            text,
            postcode: self.postcode,
        }
    }
}

// The backend is inconsistent about numeric fields: UPRNs and building
// numbers arrive as JSON strings or numbers depending on the record.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| match raw {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }))
}
