//! Tests for stream schemas

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_nullable_by_default() {
    let prop = SchemaProperty::string();
    assert!(prop.is_nullable());

    let prop = SchemaProperty::new(JsonType::String);
    assert!(!prop.is_nullable());
}

#[test]
fn test_string_serializes_as_type_pair() {
    let value = serde_json::to_value(SchemaProperty::string()).unwrap();
    assert_eq!(value, json!({"type": ["string", "null"]}));
}

#[test]
fn test_date_time_format() {
    let value = serde_json::to_value(SchemaProperty::date_time()).unwrap();
    assert_eq!(
        value,
        json!({"type": ["string", "null"], "format": "date-time"})
    );
}

#[test]
fn test_object_property() {
    let mut props = std::collections::BTreeMap::new();
    props.insert("amount".to_string(), SchemaProperty::number());
    props.insert("currency".to_string(), SchemaProperty::string());

    let value = serde_json::to_value(SchemaProperty::object(props)).unwrap();
    assert_eq!(value["type"], json!(["object", "null"]));
    assert_eq!(value["properties"]["amount"]["type"], json!(["number", "null"]));
    assert_eq!(value["additionalProperties"], true);
}

#[test]
fn test_array_property() {
    let value = serde_json::to_value(SchemaProperty::array(SchemaProperty::string())).unwrap();
    assert_eq!(value["type"], json!(["array", "null"]));
    assert_eq!(value["items"]["type"], json!(["string", "null"]));
}

#[test]
fn test_any_property_admits_null() {
    let prop = SchemaProperty::any();
    assert!(prop.is_nullable());
}

#[test]
fn test_schema_document() {
    let schema = JsonSchema::new()
        .with_property("id", SchemaProperty::string())
        .with_property("createdAt", SchemaProperty::date_time());

    assert!(schema.get_property("id").is_some());
    assert!(schema.get_property("missing").is_none());

    let value = schema.to_json();
    assert_eq!(value["$schema"], "http://json-schema.org/draft-07/schema#");
    assert_eq!(value["type"], "object");
    assert_eq!(value["additionalProperties"], true);
    assert_eq!(value["properties"]["createdAt"]["format"], "date-time");
}

#[test]
fn test_schema_round_trip() {
    let schema = JsonSchema::new().with_property("email", SchemaProperty::email());
    let json = serde_json::to_string(&schema).unwrap();
    let restored: JsonSchema = serde_json::from_str(&json).unwrap();
    assert_eq!(schema, restored);
}
