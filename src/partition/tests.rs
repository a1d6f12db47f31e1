//! Tests for partition routers

use super::*;
use serde_json::json;

#[test]
fn test_list_router_organizations() {
    let router = ListRouter::new(
        vec!["org_1".to_string(), "org_2".to_string()],
        "organizationId",
    );

    let partitions = router.partitions().unwrap();
    assert_eq!(partitions.len(), 2);
    assert_eq!(partitions[0].id, "org_1");
    assert_eq!(partitions[0].get("organizationId"), Some("org_1"));
    assert_eq!(router.partition_field(), "organizationId");
}

#[test]
fn test_list_router_empty() {
    let router = ListRouter::new(vec![], "organizationId");
    assert!(router.partitions().unwrap().is_empty());
}

#[test]
fn test_parent_router_form_ids() {
    let forms = vec![
        json!({"id": "frm_a", "name": "Signup"}),
        json!({"id": "frm_b", "name": "Survey"}),
    ];
    let router = ParentRouter::new(forms, "id", "formId");

    let partitions = router.partitions().unwrap();
    assert_eq!(partitions.len(), 2);
    assert_eq!(partitions[0].get("formId"), Some("frm_a"));
    assert_eq!(partitions[1].get("formId"), Some("frm_b"));
}

#[test]
fn test_parent_router_deduplicates_preserving_order() {
    let forms = vec![
        json!({"id": "frm_a"}),
        json!({"id": "frm_b"}),
        json!({"id": "frm_a"}),
    ];
    let router = ParentRouter::new(forms, "id", "formId");

    let ids: Vec<_> = router
        .partitions()
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["frm_a", "frm_b"]);
}

#[test]
fn test_parent_router_skips_records_without_key() {
    let forms = vec![json!({"name": "no id"}), json!({"id": "frm_a"})];
    let router = ParentRouter::new(forms, "id", "formId");

    assert_eq!(router.partitions().unwrap().len(), 1);
}
