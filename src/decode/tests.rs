//! Tests for record extraction

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

#[test]
fn test_root_array() {
    let extractor = RecordExtractor::root();
    let (_, records) = extractor
        .decode(r#"[{"id": "usr_1"}, {"id": "usr_2"}]"#)
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], "usr_1");
}

#[test]
fn test_root_single_object() {
    let extractor = RecordExtractor::root();
    let (_, records) = extractor.decode(r#"{"id": "usr_1"}"#).unwrap();
    assert_eq!(records.len(), 1);
}

#[test_case("$.items[*]", json!({"items": [{"id": "f1"}, {"id": "f2"}], "total": 2}), 2; "forms items")]
#[test_case("$.questions[*]", json!({"questions": [{"id": "q1"}]}), 1; "questions")]
#[test_case("$.submissions[*]", json!({"submissions": [], "hasMore": false}), 0; "empty submissions")]
#[test_case("$.webhooks[*]", json!({"webhooks": [{"id": "w1"}], "total": 1}), 1; "webhooks")]
fn test_wildcard_paths(path: &str, page: serde_json::Value, expected: usize) {
    let extractor = RecordExtractor::with_path(path);
    assert_eq!(extractor.extract(&page).unwrap().len(), expected);
}

#[test]
fn test_records_in_order() {
    let extractor = RecordExtractor::with_path("$.items[*]");
    let page = json!({"items": [{"id": "a"}, {"id": "b"}, {"id": "c"}]});
    let records = extractor.extract(&page).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_missing_path_yields_empty() {
    let extractor = RecordExtractor::with_path("$.items[*]");
    let page = json!({"forms": []});
    assert!(extractor.extract(&page).unwrap().is_empty());
}

#[test]
fn test_simple_path() {
    let extractor = RecordExtractor::with_path("data.entries");
    let page = json!({"data": {"entries": [{"id": 1}]}});
    assert_eq!(extractor.extract(&page).unwrap().len(), 1);
}

#[test]
fn test_malformed_body_is_decode_error() {
    let extractor = RecordExtractor::root();
    let err = extractor.decode("<html>Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_field_value() {
    let record = json!({
        "id": "sub_1",
        "submittedAt": "2025-05-01T12:00:00.000Z",
        "payments": {"amount": 12}
    });

    assert_eq!(
        field_value(&record, "submittedAt").as_deref(),
        Some("2025-05-01T12:00:00.000Z")
    );
    assert_eq!(field_value(&record, "payments.amount").as_deref(), Some("12"));
    assert_eq!(field_value(&record, "missing"), None);
    assert_eq!(field_value(&record, "payments"), None);
}
