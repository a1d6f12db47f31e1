//! Pagination types and traits

use serde_json::Value;
use std::collections::HashMap;

/// Result of the next page computation
#[derive(Debug, Clone)]
pub enum NextPage {
    /// More pages available with these query parameters
    Continue {
        /// Query parameters to add/replace on the next request
        query_params: HashMap<String, String>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with query parameters
    pub fn with_params(params: HashMap<String, String>) -> Self {
        Self::Continue {
            query_params: params,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Conditions that end a pagination sequence
#[derive(Debug, Clone, Default)]
pub enum StopCondition {
    /// Stop when a page carries no records
    #[default]
    EmptyPage,

    /// Stop when a response field has a specific value
    /// (e.g. `$.hasMore` == false)
    Field {
        /// Path to the field
        path: String,
        /// Value that ends pagination
        value: Value,
    },

    /// Stop once the fetched count reaches the reported total
    TotalCount {
        /// Path to the total count field
        path: String,
    },
}

impl StopCondition {
    /// Create a field-based stop condition
    pub fn field(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Field {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Create a total count stop condition
    pub fn total_count(path: impl Into<String>) -> Self {
        Self::TotalCount { path: path.into() }
    }
}

/// Tracks position while a stream is being paged
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Current page number
    pub page: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a fresh pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Advance to the next page
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters for the first request
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String>;

    /// Inspect a page and decide whether there is a next one
    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage;
}

/// Evaluate a stop condition against a page
pub fn check_stop_condition(
    condition: &StopCondition,
    body: &Value,
    records_count: usize,
    state: &PaginationState,
) -> bool {
    match condition {
        StopCondition::EmptyPage => records_count == 0,
        StopCondition::Field { path, value } => {
            lookup_value(body, path).is_some_and(|v| &v == value)
        }
        StopCondition::TotalCount { path } => lookup_value(body, path)
            .and_then(|v| v.as_u64())
            .is_some_and(|total| state.total_fetched >= total),
    }
}

/// Navigate a dot path (`$.hasMore`, `pagination.total`) into a page body
fn lookup_value(value: &Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        current = current.get(part)?;
    }

    Some(current.clone())
}
