//! Partition router implementations

use super::types::{PartitionRouter, PartitionValue};
use crate::decode::field_value;
use crate::error::Result;
use serde_json::Value;
use std::collections::HashSet;

// ============================================================================
// List Router
// ============================================================================

/// Partitions from a static list of values
///
/// Used for the configured organization ids.
#[derive(Debug, Clone)]
pub struct ListRouter {
    values: Vec<String>,
    partition_field: String,
}

impl ListRouter {
    /// Create a new list router
    pub fn new(values: Vec<String>, partition_field: impl Into<String>) -> Self {
        Self {
            values,
            partition_field: partition_field.into(),
        }
    }
}

impl PartitionRouter for ListRouter {
    fn partitions(&self) -> Result<Vec<PartitionValue>> {
        Ok(self
            .values
            .iter()
            .map(|v| PartitionValue::new(v).with_value(self.partition_field.clone(), v))
            .collect())
    }

    fn partition_field(&self) -> &str {
        &self.partition_field
    }
}

// ============================================================================
// Parent Router
// ============================================================================

/// Partitions from the records of a parent stream
///
/// `questions` and `submissions` are children of `forms`: each form id
/// becomes one partition of the child stream. Order follows the parent
/// stream; duplicate keys are dropped.
#[derive(Debug, Clone)]
pub struct ParentRouter {
    parent_records: Vec<Value>,
    parent_key: String,
    partition_field: String,
}

impl ParentRouter {
    /// Create a new parent router over the given parent records
    pub fn new(
        parent_records: Vec<Value>,
        parent_key: impl Into<String>,
        partition_field: impl Into<String>,
    ) -> Self {
        Self {
            parent_records,
            parent_key: parent_key.into(),
            partition_field: partition_field.into(),
        }
    }
}

impl PartitionRouter for ParentRouter {
    fn partitions(&self) -> Result<Vec<PartitionValue>> {
        let mut partitions = Vec::new();
        let mut seen = HashSet::new();

        for record in &self.parent_records {
            if let Some(key_value) = field_value(record, &self.parent_key) {
                if seen.insert(key_value.clone()) {
                    partitions.push(
                        PartitionValue::new(&key_value)
                            .with_value(self.partition_field.clone(), &key_value),
                    );
                }
            }
        }

        Ok(partitions)
    }

    fn partition_field(&self) -> &str {
        &self.partition_field
    }
}
