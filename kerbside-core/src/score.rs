//! Heuristic scoring used to pick one property among ambiguous candidates.

use regex::Regex;

use crate::model::AddressCandidate;
use crate::ports::{AddressQuery, PortError};
use crate::postcode::normalise_postcode;

/// Points for a candidate whose normalized postcode equals the target.
pub const SCORE_POSTCODE_EXACT: i32 = 100;
/// Points for a candidate whose text merely contains the target postcode.
pub const SCORE_POSTCODE_IN_TEXT: i32 = 60;
/// Points for the street fragment appearing in the candidate text.
pub const SCORE_STREET: i32 = 30;
/// Points for the house number or name appearing as a whole word.
pub const SCORE_HOUSE: i32 = 25;
/// Points for the town fragment appearing in the candidate text.
pub const SCORE_TOWN: i32 = 15;
/// Points for the full composed query appearing in the candidate text.
pub const SCORE_FULL_QUERY: i32 = 10;

/// Compute the additive relevance score of one candidate against the query.
#[must_use]
pub fn score_candidate(candidate: &AddressCandidate, query: &AddressQuery) -> i32 {
    let lowered = candidate.text.to_lowercase();
    let mut score = 0;

    if let Some(target) = query.postcode().and_then(normalise_postcode) {
        let candidate_postcode = candidate
            .postcode
            .as_deref()
            .and_then(normalise_postcode);
        if candidate_postcode.as_deref() == Some(target.as_str()) {
            score += SCORE_POSTCODE_EXACT;
        } else if lowered.contains(&target.to_lowercase()) {
            score += SCORE_POSTCODE_IN_TEXT;
        }
    }

    if let Some(street) = query.street()
        && lowered.contains(&street.to_lowercase())
    {
        score += SCORE_STREET;
    }

    if let Some(house) = query.house()
        && contains_word(&lowered, &house.to_lowercase())
    {
        score += SCORE_HOUSE;
    }

    if let Some(town) = query.town()
        && lowered.contains(&town.to_lowercase())
    {
        score += SCORE_TOWN;
    }

    let full_query = query.full_query().to_lowercase();
    if !full_query.is_empty() && lowered.contains(&full_query) {
        score += SCORE_FULL_QUERY;
    }

    score
}

/// Select the best-scoring candidate, first-seen winning ties.
///
/// When no scoring signal fired at all (best score ≤ 0), the first candidate
/// in input order is returned instead of an arbitrary zero-score pick.
///
/// # Errors
///
/// Returns [`PortError::NoCandidates`] when `candidates` is empty.
pub fn select_best<'a>(
    candidates: &'a [AddressCandidate],
    query: &AddressQuery,
) -> Result<&'a AddressCandidate, PortError> {
    let first = candidates.first().ok_or(PortError::NoCandidates)?;

    let mut best_score = i32::MIN;
    let mut best = first;
    for candidate in candidates {
        let score = score_candidate(candidate, query);
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }

    if best_score <= 0 { Ok(first) } else { Ok(best) }
}

// Whole-word containment so a house number "12" does not match inside "120".
fn contains_word(haystack: &str, needle: &str) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(needle));
    Regex::new(&pattern).is_ok_and(|matcher| matcher.is_match(haystack))
}

#[cfg(test)]
mod tests {
    use super::{
        SCORE_FULL_QUERY, SCORE_HOUSE, SCORE_POSTCODE_EXACT, SCORE_POSTCODE_IN_TEXT, SCORE_STREET,
        SCORE_TOWN, score_candidate, select_best,
    };
    use crate::model::{AddressCandidate, CouncilId, Uprn};
    use crate::ports::{AddressQuery, PortError};

    fn candidate(text: &str, postcode: Option<&str>) -> AddressCandidate {
        AddressCandidate {
            uprn: Some(Uprn(String::from("100080889"))),
            council: CouncilId(String::from("northherts")),
            text: text.to_owned(),
            postcode: postcode.map(str::to_owned),
        }
    }

    fn benslow_query() -> AddressQuery {
        AddressQuery::new(
            Some(String::from("26")),
            Some(String::from("Benslow Rise")),
            None,
            Some(String::from("SG4 9QY")),
        )
    }

    #[test]
    fn weights_are_fixed() {
        assert_eq!(SCORE_POSTCODE_EXACT, 100);
        assert_eq!(SCORE_POSTCODE_IN_TEXT, 60);
        assert_eq!(SCORE_STREET, 30);
        assert_eq!(SCORE_HOUSE, 25);
        assert_eq!(SCORE_TOWN, 15);
        assert_eq!(SCORE_FULL_QUERY, 10);
    }

    #[test]
    fn postcode_and_street_beat_a_query_substring() {
        let query = AddressQuery::new(
            None,
            Some(String::from("Benslow Rise")),
            None,
            Some(String::from("SG4 9QY")),
        );
        let strong = candidate("26 Benslow Rise Hitchin", Some("SG4 9QY"));
        let weak = candidate("Benslow Rise SG4 9QY", None);

        assert_eq!(
            score_candidate(&strong, &query),
            SCORE_POSTCODE_EXACT + SCORE_STREET
        );
        // No dedicated postcode field, but the text still contains it.
        assert_eq!(
            score_candidate(&weak, &query),
            SCORE_POSTCODE_IN_TEXT + SCORE_STREET + SCORE_FULL_QUERY
        );

        let candidates = vec![weak, strong];
        let best = select_best(&candidates, &query).expect("candidates are non-empty");
        assert_eq!(best.text, "26 Benslow Rise Hitchin");
    }

    #[test]
    fn house_number_matches_whole_words_only() {
        let query = AddressQuery::new(Some(String::from("12")), None, None, None);
        let exact = candidate("12 Benslow Rise", None);
        let longer = candidate("120 Benslow Rise", None);

        assert_eq!(score_candidate(&exact, &query), SCORE_HOUSE);
        assert_eq!(score_candidate(&longer, &query), 0);
    }

    #[test]
    fn town_fragment_adds_its_weight() {
        let query = AddressQuery::new(None, None, Some(String::from("Hitchin")), None);
        let matching = candidate("26 Benslow Rise Hitchin", None);
        assert_eq!(score_candidate(&matching, &query), SCORE_TOWN);
    }

    #[test]
    fn zero_scores_fall_back_to_the_first_candidate() {
        let query = benslow_query();
        let candidates = vec![
            candidate("1 Somewhere Else", None),
            candidate("2 Nowhere Lane", None),
        ];
        let best = select_best(&candidates, &query).expect("candidates are non-empty");
        assert_eq!(best.text, "1 Somewhere Else");
    }

    #[test]
    fn first_seen_wins_ties() {
        let query = AddressQuery::new(None, Some(String::from("Benslow Rise")), None, None);
        let candidates = vec![
            candidate("26 Benslow Rise", None),
            candidate("28 Benslow Rise", None),
        ];
        let best = select_best(&candidates, &query).expect("candidates are non-empty");
        assert_eq!(best.text, "26 Benslow Rise");
    }

    #[test]
    fn empty_candidate_list_is_an_error() {
        let query = benslow_query();
        let err = select_best(&[], &query).expect_err("no candidates to select from");
        assert!(matches!(err, PortError::NoCandidates));
    }
}
