//! Engine types
//!
//! Protocol messages produced during sync, plus configuration and
//! counters for the engine.

use crate::types::LogLevel;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A message produced during sync
#[derive(Debug, Clone)]
pub enum Message {
    /// One extracted record
    Record {
        /// Stream name
        stream: String,
        /// The record payload
        record: Value,
        /// When the record was extracted
        time_extracted: DateTime<Utc>,
    },
    /// State checkpoint (full tap state)
    State {
        /// Serialized state value
        value: Value,
    },
    /// Log message
    Log {
        /// Log level
        level: LogLevel,
        /// Log message
        message: String,
    },
}

impl Message {
    /// Create a record message stamped with the current time
    pub fn record(stream: impl Into<String>, record: Value) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted: Utc::now(),
        }
    }

    /// Create a state message
    pub fn state(value: Value) -> Self {
        Self::State { value }
    }

    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
        }
    }

    /// Create an info log
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a debug log
    pub fn debug(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Debug, message)
    }

    /// Create an error log
    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// The record payload, if this is a record message
    pub fn as_record(&self) -> Option<&Value> {
        match self {
            Self::Record { record, .. } => Some(record),
            _ => None,
        }
    }
}

/// Configuration for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Emit a state checkpoint message after every page
    pub emit_state_per_page: bool,
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit state after each page
    #[must_use]
    pub fn with_state_per_page(mut self, emit: bool) -> Self {
        self.emit_state_per_page = emit;
        self
    }
}

/// Counters from a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Records emitted
    pub records_synced: usize,
    /// Pages fetched
    pub pages_fetched: usize,
    /// Streams synced
    pub streams_synced: usize,
    /// Partitions synced
    pub partitions_synced: usize,
    /// Errors encountered
    pub errors: usize,
}

impl SyncStats {
    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records_synced += count;
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add a stream
    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    /// Add a partition
    pub fn add_partition(&mut self) {
        self.partitions_synced += 1;
    }

    /// Add an error
    pub fn add_error(&mut self) {
        self.errors += 1;
    }
}
