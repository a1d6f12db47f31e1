//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete state for the tap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct State {
    /// Per-stream state
    #[serde(default)]
    pub streams: HashMap<String, StreamState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.streams.get(stream)
    }

    /// Get mutable state for a stream, creating if needed
    pub fn get_stream_mut(&mut self, stream: &str) -> &mut StreamState {
        self.streams.entry(stream.to_string()).or_default()
    }

    /// Get the bookmark for a stream
    pub fn get_bookmark(&self, stream: &str) -> Option<&str> {
        self.streams.get(stream)?.bookmark.as_deref()
    }

    /// Set the bookmark for a stream
    pub fn set_bookmark(&mut self, stream: &str, bookmark: String) {
        self.get_stream_mut(stream).bookmark = Some(bookmark);
    }
}

/// State for a single stream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamState {
    /// Last-seen replication-key value (for incremental sync)
    #[serde(default)]
    pub bookmark: Option<String>,

    /// Per-partition state (for partitioned streams)
    #[serde(default)]
    pub partitions: HashMap<String, PartitionState>,
}

impl StreamState {
    /// Create a new empty stream state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get partition state
    pub fn get_partition(&self, partition_id: &str) -> Option<&PartitionState> {
        self.partitions.get(partition_id)
    }

    /// Get mutable partition state, creating if needed
    pub fn get_partition_mut(&mut self, partition_id: &str) -> &mut PartitionState {
        self.partitions.entry(partition_id.to_string()).or_default()
    }

    /// Check if a partition is completed
    pub fn is_partition_completed(&self, partition_id: &str) -> bool {
        self.partitions
            .get(partition_id)
            .is_some_and(|p| p.completed)
    }

    /// Mark a partition as completed
    pub fn mark_partition_completed(&mut self, partition_id: &str) {
        self.get_partition_mut(partition_id).completed = true;
    }
}

/// State for a single partition of a stream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartitionState {
    /// Bookmark within this partition
    #[serde(default)]
    pub bookmark: Option<String>,

    /// Whether this partition has been fully synced in the current run
    #[serde(default)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_default() {
        let state = State::new();
        assert!(state.streams.is_empty());
    }

    #[test]
    fn test_state_bookmark() {
        let mut state = State::new();
        assert!(state.get_bookmark("submissions").is_none());

        state.set_bookmark("submissions", "2025-05-01T00:00:00.000Z".to_string());
        assert_eq!(
            state.get_bookmark("submissions"),
            Some("2025-05-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_stream_state_partitions() {
        let mut stream_state = StreamState::new();

        assert!(!stream_state.is_partition_completed("frm_a"));

        stream_state.mark_partition_completed("frm_a");
        assert!(stream_state.is_partition_completed("frm_a"));
        assert!(!stream_state.is_partition_completed("frm_b"));
    }

    #[test]
    fn test_state_round_trip() {
        let mut state = State::new();
        state.set_bookmark("submissions", "2025-05-01T00:00:00.000Z".to_string());
        state
            .get_stream_mut("submissions")
            .get_partition_mut("frm_a")
            .bookmark = Some("2025-04-01T00:00:00.000Z".to_string());
        state
            .get_stream_mut("submissions")
            .mark_partition_completed("frm_a");

        let json = serde_json::to_string(&state).unwrap();
        let restored: State = serde_json::from_str(&json).unwrap();

        assert_eq!(
            restored.get_bookmark("submissions"),
            Some("2025-05-01T00:00:00.000Z")
        );
        let partition = restored
            .get_stream("submissions")
            .unwrap()
            .get_partition("frm_a")
            .unwrap();
        assert_eq!(partition.bookmark.as_deref(), Some("2025-04-01T00:00:00.000Z"));
        assert!(partition.completed);
    }
}
