//! Record extraction from JSON responses
//!
//! Each API page is a JSON document; a records path points at the
//! array of entities inside it (`$.items[*]`, `$.submissions[*]`, ...).
//! A malformed body is fatal for the stream being extracted.

use crate::error::{Error, Result};
use serde_json::Value;

/// Pulls the ordered record array out of a page body
#[derive(Debug, Clone, Default)]
pub struct RecordExtractor {
    /// JSONPath to the records array; None treats the body itself as records
    records_path: Option<String>,
}

impl RecordExtractor {
    /// Extractor for responses that are a bare record array
    pub fn root() -> Self {
        Self::default()
    }

    /// Extractor with a records path (e.g. `$.items[*]`)
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            records_path: Some(path.into()),
        }
    }

    /// Parse a response body into JSON
    pub fn parse(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body).map_err(|e| Error::decode(format!("Malformed JSON body: {e}")))
    }

    /// Extract records from a parsed page, in response order
    pub fn extract(&self, page: &Value) -> Result<Vec<Value>> {
        match &self.records_path {
            Some(path) if path.contains('*') => extract_with_jsonpath(page, path),
            Some(path) => match extract_simple_path(page, path) {
                Some(Value::Array(arr)) => Ok(arr),
                Some(v) => Ok(vec![v]),
                None => Ok(vec![]),
            },
            None => match page {
                Value::Array(arr) => Ok(arr.clone()),
                _ => Ok(vec![page.clone()]),
            },
        }
    }

    /// Parse and extract in one step
    pub fn decode(&self, body: &str) -> Result<(Value, Vec<Value>)> {
        let page = self.parse(body)?;
        let records = self.extract(&page)?;
        Ok((page, records))
    }
}

/// Extract records using jsonpath-rust (wildcard paths)
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path)
        .map_err(|e| Error::record_extraction(path, format!("Invalid JSONPath: {e}")))?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}

/// Extract a value by simple dot notation (`data.items`)
fn extract_simple_path(value: &Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        current = current.get(part)?;
    }

    Some(current.clone())
}

/// Read a field value out of a record, following dot notation
///
/// Used for replication keys (`submittedAt`) and parent keys (`id`).
/// Strings and numbers stringify; anything else is treated as absent.
pub fn field_value(record: &Value, field: &str) -> Option<String> {
    let mut current = record;
    for part in field.split('.') {
        current = current.get(part)?;
    }

    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
