//! Protocol message envelopes
//!
//! The tap's outbound interface: JSON-line messages on stdout, one per
//! line. Records and bookmarks are handed off as plain field-value
//! mappings; downstream tooling owns validation and loading.

use crate::engine::Message;
use crate::streams::StreamDef;
use crate::types::LogLevel;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

/// Build a SCHEMA message for a stream
pub fn schema_message(stream: &StreamDef) -> Value {
    let mut message = json!({
        "type": "SCHEMA",
        "stream": stream.name,
        "schema": stream.schema.to_json(),
        "key_properties": stream.primary_key,
    });

    if let Some(replication) = &stream.replication {
        message["bookmark_properties"] = json!([replication.key]);
    }

    message
}

/// Build a RECORD message
pub fn record_message(stream: &str, record: &Value, time_extracted: DateTime<Utc>) -> Value {
    json!({
        "type": "RECORD",
        "stream": stream,
        "record": record,
        "time_extracted": time_extracted.to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// Build a STATE message carrying the full tap state
pub fn state_message(value: &Value) -> Value {
    json!({
        "type": "STATE",
        "value": value,
    })
}

/// Build a LOG message
pub fn log_message(level: LogLevel, message: &str) -> Value {
    json!({
        "type": "LOG",
        "log": {
            "level": level.as_str(),
            "message": message,
        }
    })
}

/// Convert an engine message into its protocol envelope
pub fn envelope(message: &Message) -> Value {
    match message {
        Message::Record {
            stream,
            record,
            time_extracted,
        } => record_message(stream, record, *time_extracted),
        Message::State { value } => state_message(value),
        Message::Log { level, message } => log_message(*level, message),
    }
}
