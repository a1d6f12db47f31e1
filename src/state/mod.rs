//! State management
//!
//! Bookmarks persisted between runs so a subsequent sync resumes from
//! the last replication-key value instead of re-fetching everything.
//!
//! # Overview
//!
//! - `State` / `StreamState` / `PartitionState` - serializable progress
//! - `StateManager` - load/save with atomic file writes

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{PartitionState, State, StreamState};

#[cfg(test)]
mod manager_tests;
