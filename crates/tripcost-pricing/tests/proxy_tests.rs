//! Pricing-proxy tier tests against a mock HTTP server.

use std::sync::Arc;

use serde_json::json;
use tripcost_core::SourceKind;
use tripcost_pricing::{
    EstimateChain, FlightQuery, FlightSource, LodgingQuery, LodgingSource, ProxyClient, ProxyConfig,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn flight_query() -> FlightQuery {
    FlightQuery {
        origin_code: "ORF".into(),
        destination_code: "LIS".into(),
        depart_date: "2026-10-30".into(),
        return_date: "2026-11-06".into(),
        adults: 2,
        kids: 1,
        length_mode: false,
        length_days: 7,
        distance_miles: Some(3650.0),
    }
}

fn lodging_query() -> LodgingQuery {
    LodgingQuery {
        destination_code: "LIS".into(),
        check_in: "2026-10-30".into(),
        check_out: "2026-11-06".into(),
        adults: 2,
        kids: 1,
        nights: 7,
    }
}

fn proxy_for(server: &MockServer) -> ProxyClient {
    ProxyClient::from_config(&ProxyConfig {
        base_url: Some(format!("{}/", server.uri())),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_proxy_flight_estimate_posts_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/flights/estimate"))
        .and(body_partial_json(json!({
            "originCode": "ORF",
            "destinationCode": "LIS",
            "adults": 2,
            "kids": 1,
            "lengthMode": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalAdultFare": 2000,
            "totalKidFare": "740",
            "totalFare": 2740,
            "provider": "Duffel via proxy"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let proxy = proxy_for(&server);
    let estimate = proxy.flight_estimate(&flight_query()).await.unwrap().unwrap();

    assert_eq!(estimate.total_fare, 2740.0);
    assert_eq!(estimate.total_kid_fare, 740.0);
    assert_eq!(estimate.source.name, "Duffel via proxy");
    assert_eq!(estimate.source.detail, "Live route pricing from configured travel proxy");
    assert_eq!(estimate.source.kind, SourceKind::Api);
}

#[tokio::test]
async fn test_proxy_lodging_estimate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/lodging/estimate"))
        .and(body_partial_json(json!({ "destinationCode": "LIS", "nights": 7 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nightlyRate": "150.5",
            "totalStayCost": 1053.5
        })))
        .mount(&server)
        .await;

    let proxy = proxy_for(&server);
    let estimate = proxy.lodging_estimate(&lodging_query()).await.unwrap().unwrap();

    assert_eq!(estimate.nightly_rate, 150.5);
    assert_eq!(estimate.total_stay_cost, 1053.5);
    assert_eq!(estimate.source.name, "Travel Proxy (Amadeus/Expedia Rapid)");
}

#[tokio::test]
async fn test_proxy_error_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/flights/estimate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let proxy = proxy_for(&server);
    let err = proxy.flight_estimate(&flight_query()).await.unwrap_err();
    assert!(err.is_network_error());
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_chain_prefers_proxy() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/lodging/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nightlyRate": 99,
            "totalStayCost": 693
        })))
        .mount(&server)
        .await;

    let chain = EstimateChain::heuristic_only().with_lodging_source(Arc::new(proxy_for(&server)));
    let estimate = chain.lodging_estimate(&lodging_query()).await;

    assert_eq!(estimate.total_stay_cost, 693.0);
    assert_eq!(estimate.source.kind, SourceKind::Api);
}

#[tokio::test]
async fn test_chain_falls_back_when_proxy_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/flights/estimate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/lodging/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalStayCost": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let proxy = Arc::new(proxy_for(&server));
    let chain = EstimateChain::heuristic_only()
        .with_flight_source(proxy.clone())
        .with_lodging_source(proxy);

    let flight = chain.flight_estimate(&flight_query()).await;
    let lodging = chain.lodging_estimate(&lodging_query()).await;

    assert_eq!(flight.source.kind, SourceKind::Heuristic);
    assert!(flight.is_usable());
    assert_eq!(lodging.source.kind, SourceKind::Heuristic, "zero totals are not usable");
    assert!(lodging.is_usable());
}

#[tokio::test]
async fn test_proxy_unreachable_falls_back() {
    // Nothing listens on port 9 on test hosts
    let proxy = ProxyClient::from_config(&ProxyConfig {
        base_url: Some("http://127.0.0.1:9".into()),
        timeout_secs: 2,
    })
    .unwrap();

    let chain = EstimateChain::heuristic_only().with_flight_source(Arc::new(proxy));
    let estimate = chain.flight_estimate(&flight_query()).await;
    assert_eq!(estimate.source.kind, SourceKind::Heuristic);
}
