//! Integration tests for the North Herts ports using wiremock HTTP mocks.

use std::sync::Arc;

use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kerbside_core::model::{CouncilId, Councils, Icon, Uprn};
use kerbside_core::plugin::PluginRegistry;
use kerbside_core::ports::{AddressPort, AddressQuery, PortError};
use kerbside_core::service::KerbsideService;
use kerbside_provider_northherts::{NorthHertsAddressPort, plugin_with_base_url};

const ADDRESSES_PATH: &str = "/northherts/citizenmobile/mobileapi/addresses";
const WASTE_PATH: &str = "/northherts/citizenmobile/mobileapi/wastecollections/100080889";

fn council() -> CouncilId {
    Councils::NorthHerts.into()
}

fn service_for(base_url: &str) -> KerbsideService {
    let registry = Arc::new(PluginRegistry::new(vec![plugin_with_base_url(
        Client::new(),
        base_url,
    )]));
    KerbsideService::new(registry)
}

fn benslow_query() -> AddressQuery {
    AddressQuery::new(
        Some(String::from("26")),
        Some(String::from("Benslow Rise")),
        None,
        Some(String::from("SG4 9QY")),
    )
}

#[tokio::test]
async fn fallback_chain_advances_past_answers_without_a_list() {
    let server = MockServer::start().await;

    // First attempt: the backend answers, but without an address list.
    Mock::given(method("GET"))
        .and(path(ADDRESSES_PATH))
        .and(query_param("postcode", "SG4 9QY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    // Second attempt: the broad address query carries the list.
    Mock::given(method("GET"))
        .and(path(ADDRESSES_PATH))
        .and(query_param("address", "26 Benslow Rise SG4 9QY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "addresses": [
                {
                    "fullAddress": "26 Benslow Rise, Hitchin, SG4 9QY",
                    "postcode": "SG4 9QY",
                    "uprn": "100080889"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let port = NorthHertsAddressPort::with_base_url(Client::new(), server.uri());
    let candidates = port
        .search(&benslow_query())
        .await
        .expect("second attempt answers with a list");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].text, "26 Benslow Rise, Hitchin, SG4 9QY");
    assert_eq!(candidates[0].uprn, Some(Uprn(String::from("100080889"))));
}

#[tokio::test]
async fn equal_attempts_are_issued_only_once() {
    let server = MockServer::start().await;

    // A canonical postcode dedupes the raw-postcode attempt away: exactly
    // one postcode lookup may reach the backend. The remaining attempts
    // reuse the same text under the broad parameters.
    for param in ["postcode", "address", "query"] {
        Mock::given(method("GET"))
            .and(path(ADDRESSES_PATH))
            .and(query_param(param, "SG4 9QY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let port = NorthHertsAddressPort::with_base_url(Client::new(), server.uri());
    let query = AddressQuery::new(None, None, None, Some(String::from("SG4 9QY")));
    let err = port
        .search(&query)
        .await
        .expect_err("no attempt carries a list");

    assert!(matches!(err, PortError::LookupExhausted));
}

#[tokio::test]
async fn empty_address_list_stops_the_chain() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESSES_PATH))
        .and(query_param("postcode", "SG4 9QY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "addresses": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server.uri());
    let err = service
        .resolve_collections(council(), &benslow_query())
        .await
        .expect_err("an empty list is unusable at disambiguation");

    assert!(matches!(err, PortError::NoCandidates));
}

#[tokio::test]
async fn resolution_picks_the_best_candidate_and_sorts_the_schedule() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESSES_PATH))
        .and(query_param("postcode", "SG4 9QY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "addresses": [
                {
                    "fullAddress": "120 Benslow Rise, Hitchin",
                    "postcode": "SG5 1AA",
                    "uprn": "999999999"
                },
                {
                    "fullAddress": "26 Benslow Rise, Hitchin",
                    "postcode": "SG4 9QY",
                    "uprn": 100080889
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(WASTE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "RefuseCollectionDetails": { "collectionDate": "2024-03-04" },
            "RecyclingCollectionDetails": { "nextCollection": { "date": "2024-03-01" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server.uri());
    let collections = service
        .resolve_collections(council(), &benslow_query())
        .await
        .expect("resolution succeeds");

    assert_eq!(collections.len(), 2);
    assert_eq!(collections[0].waste_stream, "Recycling");
    assert_eq!(collections[0].icon, Some(Icon::Recycle));
    assert_eq!(collections[1].waste_stream, "Refuse");
    assert_eq!(collections[1].icon, Some(Icon::TrashCan));
    assert!(collections[0].date < collections[1].date);
}

#[tokio::test]
async fn non_success_status_fails_the_resolution() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESSES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server.uri());
    let err = service
        .resolve_collections(council(), &benslow_query())
        .await
        .expect_err("server errors must not be skipped");

    assert!(matches!(err, PortError::Network(_)));
}

#[tokio::test]
async fn chosen_candidate_without_uprn_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESSES_PATH))
        .and(query_param("postcode", "SG4 9QY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "addresses": [
                {
                    "fullAddress": "26 Benslow Rise, Hitchin",
                    "postcode": "SG4 9QY"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server.uri());
    let err = service
        .resolve_collections(council(), &benslow_query())
        .await
        .expect_err("no schedule lookup is possible without a UPRN");

    assert!(matches!(err, PortError::MissingUprn));
}

#[tokio::test]
async fn schedule_without_records_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESSES_PATH))
        .and(query_param("postcode", "SG4 9QY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "addresses": [
                {
                    "fullAddress": "26 Benslow Rise, Hitchin",
                    "postcode": "SG4 9QY",
                    "uprn": "100080889"
                }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(WASTE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let service = service_for(&server.uri());
    let err = service
        .resolve_collections(council(), &benslow_query())
        .await
        .expect_err("an empty schedule is indistinguishable from a lookup bug");

    assert!(matches!(err, PortError::EmptySchedule));
}

#[tokio::test]
async fn blank_query_issues_no_requests() {
    let server = MockServer::start().await;

    let port = NorthHertsAddressPort::with_base_url(Client::new(), server.uri());
    let err = port
        .search(&AddressQuery::default())
        .await
        .expect_err("nothing to search for");

    assert!(matches!(err, PortError::LookupExhausted));
    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn unknown_council_is_rejected() {
    let server = MockServer::start().await;

    let service = service_for(&server.uri());
    let err = service
        .resolve_collections(CouncilId(String::from("gotham")), &benslow_query())
        .await
        .expect_err("no plugin is registered for this council");

    assert!(matches!(err, PortError::UnsupportedCouncil));
}
