//! Normalization of the waste-collections payload.
//!
//! The schedule document has shipped in several incompatible shapes over
//! the years: a `collections` map of per-stream blocks, and top-level
//! `…CollectionDetails` keys holding either one block or a list of blocks,
//! with dates spread across scalar fields, date lists, and nested
//! next-collection objects. One stable record shape is extracted from
//! whichever variant arrives, via independent extraction rules tried in
//! priority order.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

use kerbside_core::model::{Collection, Icon};

use crate::dates::parse_date_value;

const CONTAINER_KEYS: [&str; 2] = ["wasteCollectionDates", "WasteCollectionDates"];
const DETAILS_SUFFIX: &str = "collectiondetails";

const LABEL_KEYS: [&str; 3] = ["containerDescription", "containerName", "collectionType"];
const SCALAR_DATE_KEYS: [&str; 3] = ["collectionDate", "nextCollectionDate", "nextCollection"];
const NESTED_DATE_KEYS: [&str; 3] = ["collectionDate", "nextCollectionDate", "date"];

// Streams with well-known labels map directly to an icon.
const ICON_MAP: &[(&str, Icon)] = &[
    ("Refuse Collection", Icon::TrashCan),
    ("Refuse", Icon::TrashCan),
    ("Residual Waste", Icon::TrashCan),
    ("Mixed Recycling Collection", Icon::Recycle),
    ("Mixed Recycling", Icon::Recycle),
    ("Dry Recycling", Icon::Recycle),
    ("Garden Collection", Icon::Leaf),
    ("Garden Waste", Icon::Leaf),
    ("Food Collection", Icon::FoodApple),
    ("Food Waste", Icon::FoodApple),
    ("Paper/Card Collection", Icon::PackageVariant),
    ("Paper & Card", Icon::PackageVariant),
];

// Everything else falls back to keyword sniffing, checked in this order.
const ICON_KEYWORDS: &[(&str, Icon)] = &[
    ("refuse", Icon::TrashCan),
    ("residual", Icon::TrashCan),
    ("recycle", Icon::Recycle),
    ("recycling", Icon::Recycle),
    ("garden", Icon::Leaf),
    ("food", Icon::FoodApple),
    ("paper", Icon::PackageVariant),
    ("card", Icon::PackageVariant),
];

/// Normalize a raw waste-collections payload into deduplicated collection
/// records, sorted ascending by date. An empty result means the payload
/// carried no usable schedule at all.
pub(crate) fn build_collections(payload: &Value) -> Vec<Collection> {
    let mut collections = Vec::new();
    let mut seen: HashSet<(NaiveDate, String)> = HashSet::new();

    for (key, block) in collection_blocks(payload) {
        let label = stream_label(&key, block);
        let icon = icon_for(&label);

        for date in extract_dates(block) {
            if seen.insert((date, label.clone())) {
                collections.push(Collection {
                    date,
                    waste_stream: label.clone(),
                    icon,
                });
            }
        }
    }

    collections.sort_by_key(|collection| collection.date);
    debug!(records = collections.len(), "normalized collections payload");
    collections
}

// Locate the per-stream detail blocks under any of the known containers:
// a dedicated `collections` map when present, otherwise every top-level
// key carrying the details suffix.
fn collection_blocks(payload: &Value) -> Vec<(String, &Map<String, Value>)> {
    let container = CONTAINER_KEYS
        .iter()
        .find_map(|key| non_empty_object(payload.get(key)?))
        .or_else(|| payload.as_object());
    let Some(container) = container else {
        return Vec::new();
    };

    if let Some(section) = container.get("collections").and_then(non_empty_object) {
        return section
            .iter()
            .filter_map(|(key, value)| Some((key.clone(), non_empty_object(value)?)))
            .collect();
    }

    let mut blocks = Vec::new();
    for (key, value) in container {
        if !key.to_lowercase().ends_with(DETAILS_SUFFIX) {
            continue;
        }
        if let Value::Array(entries) = value {
            for (index, entry) in entries.iter().enumerate() {
                if let Some(block) = non_empty_object(entry) {
                    blocks.push((format!("{key}_{}", index + 1), block));
                }
            }
        } else if let Some(block) = non_empty_object(value) {
            blocks.push((key.clone(), block));
        }
    }
    blocks
}

fn non_empty_object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object().filter(|object| !object.is_empty())
}

// Label from the first descriptive field, falling back to the block key.
fn stream_label(key: &str, block: &Map<String, Value>) -> String {
    let raw = LABEL_KEYS
        .iter()
        .find_map(|label_key| text_value(block.get(*label_key)?))
        .unwrap_or_else(|| key.to_owned());
    clean_stream_label(&raw)
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

// Strip the trailing container words so "Refuse Collection",
// "RefuseCollectionDetails" and "Refuse" all normalize identically.
fn clean_stream_label(name: &str) -> String {
    let mut cleaned = name.trim();
    for suffix in ["details", "collection", "bin"] {
        if let Some(head) = strip_suffix_ignore_case(cleaned, suffix) {
            cleaned = head.trim_end();
        }
    }
    if cleaned.is_empty() {
        name.to_owned()
    } else {
        cleaned.to_owned()
    }
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split_at = text.len().checked_sub(suffix.len())?;
    let (head, tail) = text.split_at_checked(split_at)?;
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

// Exact label match first, then keyword sniffing in fixed order.
fn icon_for(label: &str) -> Option<Icon> {
    if let Some(entry) = ICON_MAP.iter().find(|entry| entry.0 == label) {
        return Some(entry.1);
    }
    let lowered = label.to_lowercase();
    ICON_KEYWORDS
        .iter()
        .find(|entry| lowered.contains(entry.0))
        .map(|entry| entry.1)
}

// Collect every candidate date across the known field shapes: direct
// scalars, a list of scalars, a list of nested entries, and the singular
// nested next-collection object. Unparseable values are dropped.
fn extract_dates(block: &Map<String, Value>) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();
    let mut push = |value: &Value| {
        if let Some(date) = parse_date_value(value) {
            dates.insert(date);
        }
    };

    for key in SCALAR_DATE_KEYS {
        if let Some(value) = block.get(key) {
            push(value);
        }
    }

    if let Some(entries) = block.get("collectionDates").and_then(Value::as_array) {
        for entry in entries {
            push(entry);
        }
    }

    if let Some(entries) = block.get("futureCollections").and_then(Value::as_array) {
        for entry in entries {
            match entry.as_object() {
                Some(nested) => {
                    if let Some(value) = first_nested_date(nested) {
                        push(value);
                    }
                }
                None => push(entry),
            }
        }
    }

    if let Some(nested) = block.get("nextCollection").and_then(Value::as_object)
        && let Some(value) = first_nested_date(nested)
    {
        push(value);
    }

    dates
}

// First date-bearing field of a nested entry, skipping null and empty
// values the way the backend pads absent dates.
fn first_nested_date(nested: &Map<String, Value>) -> Option<&Value> {
    NESTED_DATE_KEYS
        .iter()
        .filter_map(|key| nested.get(*key))
        .find(|value| match value {
            Value::Null => false,
            Value::String(text) => !text.is_empty(),
            _ => true,
        })
}

#[cfg(test)]
#[path = "schedule_test.rs"]
mod tests;
