//! Ordered, deduplicated lookup attempts for the address search.

use std::collections::HashSet;

use kerbside_core::ports::AddressQuery;
use kerbside_core::postcode::normalise_postcode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Query parameter accepted by the `/addresses` endpoint.
pub(crate) enum SearchParam {
    Postcode,
    Address,
    Query,
}

impl SearchParam {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            SearchParam::Postcode => "postcode",
            SearchParam::Address => "address",
            SearchParam::Query => "query",
        }
    }
}

/// Build the lookup attempts in priority order: exact postcode first, the
/// broadest free-text query last. Attempts whose text trims empty are
/// skipped, and repeated `(parameter, text)` pairs are issued only once.
pub(crate) fn search_attempts(query: &AddressQuery) -> Vec<(SearchParam, String)> {
    let full_query = query.full_query();
    let street_line = query.street_line();

    let raw_attempts = [
        (
            SearchParam::Postcode,
            query.postcode().and_then(normalise_postcode),
        ),
        (SearchParam::Postcode, query.postcode().map(str::to_owned)),
        (SearchParam::Address, Some(full_query.clone())),
        (SearchParam::Query, Some(full_query)),
        (SearchParam::Address, Some(street_line.clone())),
        (SearchParam::Query, Some(street_line)),
        (SearchParam::Query, query.street().map(str::to_owned)),
    ];

    let mut seen = HashSet::new();
    let mut attempts = Vec::new();
    for (param, text) in raw_attempts {
        let Some(text) = text else { continue };
        let cleaned = text.trim();
        if cleaned.is_empty() {
            continue;
        }
        if seen.insert((param, cleaned.to_lowercase())) {
            attempts.push((param, cleaned.to_owned()));
        }
    }
    attempts
}
