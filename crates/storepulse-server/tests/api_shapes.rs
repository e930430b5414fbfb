//! API shape tests — validates that response payloads keep the wire field
//! names the dashboard frontend expects.
//!
//! Analytics payloads are produced by the real library functions and
//! serialized, so a rename in any crate shows up here.

use chrono::{TimeZone, Utc};
use serde_json::Value;
use storepulse_analytics::{
    analyze_scope, compute_metrics, detect_anomalies, rank_stores, store_rating_distribution,
    RankingDirection, ScopeKind,
};
use storepulse_core::{PeriodGranularity, Review, Store};
use storepulse_heuristics::{deep_analyze, enrich_anomalies, enrich_regional, mine_perceptions};

fn store(id: &str, state: &str, region: &str) -> Store {
    Store {
        id: id.into(),
        name: format!("Loja {id}"),
        code: Some(format!("C{id}")),
        place_id: format!("place-{id}"),
        state: state.into(),
        region: region.into(),
        team: Some("Time 1".into()),
        address: None,
        city: None,
    }
}

fn review(store_id: &str, rating: u8, comment: Option<&str>) -> Review {
    Review {
        id: format!("{store_id}-{rating}-{}", comment.map(str::len).unwrap_or_default()),
        store_id: store_id.into(),
        place_id: format!("place-{store_id}"),
        date: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
        rating,
        comment: comment.map(Into::into),
        author: None,
        author_url: None,
        source_time: None,
    }
}

fn fixture() -> (Vec<Store>, Vec<Review>) {
    let stores = vec![store("a", "SP", "Sudeste"), store("b", "RS", "Sul")];
    let reviews = vec![
        review("a", 5, Some("Atendimento excelente, loja limpa e organizada")),
        review("a", 4, None),
        review("b", 2, Some("Fila enorme, muita demora no caixa")),
        review("b", 1, Some("Sistema fora do ar, funcionário perdido no processo")),
        review("b", 2, Some("Preço alto e estoque em falta")),
    ];
    (stores, reviews)
}

/// { reviews, total, storesProcessed, elapsedSeconds }
#[test]
fn test_reviews_payload_shape() {
    let payload = serde_json::json!({
        "reviews": [],
        "total": 0,
        "storesProcessed": 2,
        "elapsedSeconds": 0.41,
    });

    assert!(payload["reviews"].is_array());
    assert!(payload["total"].is_number());
    assert!(payload["storesProcessed"].is_number());
    assert!(payload["elapsedSeconds"].is_number());
}

#[test]
fn test_review_wire_names() {
    let value = serde_json::to_value(review("a", 5, Some("ótimo"))).unwrap();
    assert!(value["storeId"].is_string());
    assert!(value["rating"].is_number());
    assert!(value.get("store_id").is_none());
}

#[test]
fn test_metrics_shape() {
    let (_, reviews) = fixture();
    let value = serde_json::to_value(compute_metrics(&reviews, PeriodGranularity::Day)).unwrap();

    assert!(value["average"].is_number());
    assert!(value["total"].is_number());
    assert!(value["histogram"]["5"].is_number());
    assert!(value["trend"].is_array());
    assert!(value["trend"][0]["period"].is_string());
}

#[test]
fn test_ranking_entry_shape() {
    let (stores, reviews) = fixture();
    let entries = rank_stores(&reviews, &stores, RankingDirection::Best, 10);
    let value = serde_json::to_value(&entries).unwrap();

    assert_eq!(value.as_array().unwrap().len(), 2);
    assert!(value[0]["storeId"].is_string());
    assert!(value[0]["average"].is_number());
    assert!(value[0]["position"].is_number());
}

#[test]
fn test_regional_shape_carries_annotations() {
    let (stores, reviews) = fixture();
    let raw = analyze_scope(&reviews, &stores, ScopeKind::Region, "Sul").unwrap();
    let value = serde_json::to_value(enrich_regional(raw, &reviews)).unwrap();

    assert!(value["scopeAverage"].is_number());
    assert!(value["storeCount"].is_number());
    assert!(value["status"].is_string());
    assert!(value["patternDescription"].is_string());
    assert!(value["topStoresAnnotated"].is_array());
    assert!(value["opportunityStoresAnnotated"].is_array());
}

#[test]
fn test_anomaly_shape() {
    let (stores, reviews) = fixture();
    let raw = detect_anomalies(&reviews, &stores, 3.5);
    let value = serde_json::to_value(enrich_anomalies(raw, &reviews)).unwrap();

    let anomaly = &value.as_array().unwrap()[0];
    assert!(anomaly["store"].is_object());
    assert!(anomaly["average"].is_number());
    assert!(anomaly["baseline"].is_number());
    assert!(anomaly["gap"].is_number());
    assert!(anomaly["severity"].is_string());
    assert!(anomaly["reasons"].is_array());
    assert!(anomaly["conclusion"].is_string());
}

#[test]
fn test_distribution_shape() {
    let (stores, reviews) = fixture();
    let value = serde_json::to_value(store_rating_distribution(&reviews, &stores)).unwrap();

    let bucket = &value.as_array().unwrap()[0];
    assert!(bucket["average"].is_number());
    assert!(bucket["count"].is_number());
    assert!(bucket["percentage"].is_number());
}

#[test]
fn test_perceptions_shape() {
    let (stores, reviews) = fixture();
    let value = serde_json::to_value(mine_perceptions(&reviews, &stores)).unwrap();

    assert!(value["positive"].is_array());
    assert!(value["negative"].is_array());
    for perception in value["negative"].as_array().unwrap() {
        assert!(perception["theme"].is_string());
        assert!(perception["percentage"].is_number());
        assert!(perception["stores"].is_array());
        assert!(perception["examples"].is_array());
    }
}

#[test]
fn test_deep_analysis_shape() {
    let (stores, reviews) = fixture();
    let value = serde_json::to_value(deep_analyze(&reviews, &stores[1])).unwrap();

    assert!(value["store"].is_object());
    assert!(value["average"].is_number());
    assert!(value["aspects"].is_object());
    assert!(value["quotes"].is_array());
    assert!(value["conclusion"].is_string());
}

/// Error payloads use { error, details } plus a suggestion on timeouts.
#[test]
fn test_error_payload_shape() {
    let timeout = serde_json::json!({
        "error": "The request took too long to process",
        "details": "review fetch for 40 stores exceeded 60s",
        "suggestion": "Narrow the scope with a store, team, state or region filter and try again",
    });
    assert!(timeout["error"].is_string());
    assert!(timeout["suggestion"].is_string());

    let not_found: Value = serde_json::json!({
        "error": "Not found",
        "details": "store ghost is not in the directory",
    });
    assert!(not_found["details"].is_string());
}
