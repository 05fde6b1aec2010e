use super::*;

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use huni_core::CustomPoi;

use crate::cache::MemoryCache;
use crate::poi::{EmptyPoiStore, StaticPoiStore};

const ORIGIN: (f64, f64) = (-6.2, 106.8);

fn test_config(endpoint: String) -> EngineConfig {
    EngineConfig {
        endpoint,
        max_retries: 1,
        backoff_base_secs: 0,
        rate_limit_backoff_secs: 0,
        inter_category_delay_ms: 0,
        ..EngineConfig::default()
    }
}

fn test_cache() -> MemoryCache {
    MemoryCache::new(64, std::time::Duration::from_secs(60))
}

fn hospital_body() -> serde_json::Value {
    serde_json::json!({
        "elements": [{
            "type": "node",
            "id": 101,
            "lat": ORIGIN.0,
            "lon": ORIGIN.1,
            "tags": { "amenity": "hospital", "name": "RSUD Pusat" }
        }]
    })
}

fn empty_body() -> serde_json::Value {
    serde_json::json!({ "elements": [] })
}

#[tokio::test]
async fn rejects_out_of_range_coordinates() {
    let engine = LivabilityEngine::new(
        test_config("http://127.0.0.1:9".to_string()),
        test_cache(),
        EmptyPoiStore,
    )
    .unwrap();
    let err = engine.score(91.0, 106.8, "nowhere").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidCoordinate { .. }));
    let err = engine.score(-6.2, f64::NAN, "nowhere").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidCoordinate { .. }));
}

#[tokio::test]
async fn same_element_across_buckets_is_counted_once() {
    // Every category query returns the same hospital node; it classifies
    // as health each time, and the identity dedup keeps a single record.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hospital_body()))
        .mount(&server)
        .await;

    let engine =
        LivabilityEngine::new(test_config(server.uri()), test_cache(), EmptyPoiStore).unwrap();
    let outcome = engine.score(ORIGIN.0, ORIGIN.1, "Jakarta").await.unwrap();

    assert_eq!(outcome.facilities.len(), 1);
    assert_eq!(outcome.facilities[0].id, "health-101");
    assert_eq!(
        outcome.result.facility_counts.get(&Category::Health),
        Some(&1)
    );
    // Hospital at distance 0: contribution 10 → services 12, safety 8.
    assert_eq!(outcome.result.subscores.services, 12);
    assert_eq!(outcome.result.subscores.safety, 8);
    assert_eq!(outcome.result.location.address, "Jakarta");
}

#[tokio::test]
async fn total_fetch_failure_still_returns_a_complete_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        // 10 categories × (1 try + 1 retry)
        .expect(20)
        .mount(&server)
        .await;

    let engine =
        LivabilityEngine::new(test_config(server.uri()), test_cache(), EmptyPoiStore).unwrap();
    let outcome = engine.score(ORIGIN.0, ORIGIN.1, "Jakarta").await.unwrap();

    assert!(outcome.facilities.is_empty());
    assert_eq!(outcome.result.overall, 0.0);
    assert_eq!(outcome.result.facility_counts.len(), 10);
    assert!(outcome.result.facility_counts.values().all(|&c| c == 0));
}

#[tokio::test]
async fn second_run_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        // One network fetch per category; the second run must add none.
        .expect(10)
        .mount(&server)
        .await;

    let engine =
        LivabilityEngine::new(test_config(server.uri()), test_cache(), EmptyPoiStore).unwrap();
    engine.score(ORIGIN.0, ORIGIN.1, "Jakarta").await.unwrap();
    engine.score(ORIGIN.0, ORIGIN.1, "Jakarta").await.unwrap();
}

#[tokio::test]
async fn failed_categories_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        // Two full runs retry every category again: nothing was cached.
        .expect(40)
        .mount(&server)
        .await;

    let engine =
        LivabilityEngine::new(test_config(server.uri()), test_cache(), EmptyPoiStore).unwrap();
    engine.score(ORIGIN.0, ORIGIN.1, "Jakarta").await.unwrap();
    engine.score(ORIGIN.0, ORIGIN.1, "Jakarta").await.unwrap();
}

#[tokio::test]
async fn custom_pois_fold_into_the_score() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .mount(&server)
        .await;

    let store = StaticPoiStore::new(vec![CustomPoi {
        id: "p1".to_string(),
        name: "Taman Warga".to_string(),
        category: "custom".to_string(),
        lat: ORIGIN.0,
        lng: ORIGIN.1,
    }]);
    let engine = LivabilityEngine::new(test_config(server.uri()), test_cache(), store).unwrap();
    let outcome = engine.score(ORIGIN.0, ORIGIN.1, "Jakarta").await.unwrap();

    assert_eq!(outcome.facilities.len(), 1);
    assert_eq!(outcome.facilities[0].category, Category::Recreation);
    assert_eq!(
        outcome.result.facility_counts.get(&Category::Recreation),
        Some(&1)
    );
    // Recreation max contribution 9 at distance 0 → environment 9 * 2.5.
    assert_eq!(outcome.result.subscores.environment, 23);
}
