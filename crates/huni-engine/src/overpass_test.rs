use super::*;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(endpoint: String) -> EngineConfig {
    EngineConfig {
        endpoint,
        max_retries: 2,
        backoff_base_secs: 0,
        rate_limit_backoff_secs: 0,
        inter_category_delay_ms: 0,
        ..EngineConfig::default()
    }
}

fn elements_body() -> serde_json::Value {
    serde_json::json!({
        "version": 0.6,
        "elements": [
            {
                "type": "node",
                "id": 101,
                "lat": -6.2001,
                "lon": 106.8001,
                "tags": { "amenity": "hospital", "name": "RSUD Tarakan" }
            },
            {
                "type": "way",
                "id": 202,
                "center": { "lat": -6.2002, "lon": 106.8002 },
                "tags": { "amenity": "clinic" }
            },
            { "type": "node", "id": 303 }
        ]
    })
}

#[test]
fn category_query_includes_radius_and_origin() {
    let query = category_query(Category::Health, -6.2, 106.8, 1000.0);
    assert!(query.starts_with("[out:json]"));
    assert!(query.contains("(around:1000,-6.2,106.8)"));
    assert!(query.contains("hospital|clinic"));
    assert!(query.ends_with("out center 200;"));
}

#[test]
fn every_category_has_at_least_one_selector() {
    for category in Category::ALL {
        let query = category_query(category, -6.2, 106.8, 1000.0);
        assert!(query.contains("nwr["), "{category} query has no selector");
    }
}

#[test]
fn market_query_matches_any_shop() {
    let query = category_query(Category::Market, -6.2, 106.8, 1000.0);
    assert!(query.contains(r#"nwr["shop"]"#));
}

#[tokio::test]
async fn fetch_parses_nodes_ways_and_bare_elements() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(elements_body()))
        .mount(&server)
        .await;

    let config = test_config(format!("{}/api/interpreter", server.uri()));
    let client = OverpassClient::new(&config).unwrap();
    let elements = client
        .fetch_elements(&category_query(Category::Health, -6.2, 106.8, 1000.0))
        .await
        .unwrap();

    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0].id, 101);
    assert_eq!(elements[0].lat, Some(-6.2001));
    assert_eq!(elements[0].tags.get("name").unwrap(), "RSUD Tarakan");
    let center = elements[1].center.unwrap();
    assert!((center.lat - (-6.2002)).abs() < 1e-9);
    // Element 303 has neither coordinates nor tags; it still parses.
    assert!(elements[2].lat.is_none() && elements[2].center.is_none());
    assert!(elements[2].tags.is_empty());
}

#[tokio::test]
async fn fetch_retries_429_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(elements_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(server.uri());
    let client = OverpassClient::new(&config).unwrap();
    let elements = client.fetch_elements("[out:json];out;").await.unwrap();
    assert_eq!(elements.len(), 3);
}

#[tokio::test]
async fn fetch_retries_5xx_until_budget_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        // max_retries = 2 → 3 total attempts
        .expect(3)
        .mount(&server)
        .await;

    let config = test_config(server.uri());
    let client = OverpassClient::new(&config).unwrap();
    let err = client.fetch_elements("[out:json];out;").await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::UnexpectedStatus { status: 502, .. }
    ));
}

#[tokio::test]
async fn fetch_does_not_retry_4xx() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(server.uri());
    let client = OverpassClient::new(&config).unwrap();
    let err = client.fetch_elements("bad query").await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::UnexpectedStatus { status: 400, .. }
    ));
}

#[tokio::test]
async fn fetch_does_not_retry_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(server.uri());
    let client = OverpassClient::new(&config).unwrap();
    let err = client.fetch_elements("[out:json];out;").await.unwrap_err();
    assert!(matches!(err, EngineError::Deserialize { .. }));
}
