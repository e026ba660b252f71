//! Domain data structures for councils, addresses, and collection schedules.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Built-in councils supported by the application.
pub enum Councils {
    /// North Hertfordshire District Council, UK.
    NorthHerts,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a council known to kerbside.
pub struct CouncilId(pub String);

impl fmt::Display for Councils {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            Councils::NorthHerts => "northherts",
        };
        write!(formatter, "{slug}")
    }
}

impl From<Councils> for CouncilId {
    fn from(council: Councils) -> Self {
        CouncilId(council.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a council and its human-friendly name.
pub struct CouncilMeta {
    /// Unique identifier.
    pub id: CouncilId,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Authoritative property reference used by a council backend to identify a
/// physical address for schedule lookups.
pub struct Uprn(pub String);

impl fmt::Display for Uprn {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Address candidate returned from a provider search, not yet confirmed as
/// the correct property.
pub struct AddressCandidate {
    /// Property reference needed for schedule lookups, when the record
    /// exposes one.
    pub uprn: Option<Uprn>,
    /// Council the candidate belongs to.
    pub council: CouncilId,
    /// Single-line rendering of every populated address field.
    pub text: String,
    /// Dedicated postcode field, when the record carries one.
    pub postcode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Icon hint attached to a recognized waste stream.
pub enum Icon {
    /// Refuse / residual waste.
    TrashCan,
    /// Mixed or dry recycling.
    Recycle,
    /// Garden waste.
    Leaf,
    /// Food waste.
    FoodApple,
    /// Paper and card.
    PackageVariant,
}

impl fmt::Display for Icon {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            Icon::TrashCan => "mdi:trash-can",
            Icon::Recycle => "mdi:recycle",
            Icon::Leaf => "mdi:leaf",
            Icon::FoodApple => "mdi:food-apple",
            Icon::PackageVariant => "mdi:package-variant",
        };
        write!(formatter, "{slug}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Scheduled collection of one waste stream on a specific day.
pub struct Collection {
    /// Date of the collection.
    pub date: NaiveDate,
    /// Normalized waste stream label, e.g. "Refuse" or "Mixed Recycling".
    pub waste_stream: String,
    /// Optional icon hint inferred from the label.
    pub icon: Option<Icon>,
}
