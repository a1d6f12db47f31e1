//! Pagination strategy implementations

use super::types::{check_stop_condition, NextPage, PaginationState, Paginator, StopCondition};
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination
///
/// The Tally list endpoints take a `page` parameter starting at 1 and
/// an optional `limit` page size:
/// - `/forms?page=2&limit=500`
/// - `/forms/{formId}/submissions?page=3`
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for the page number
    pub page_param: String,
    /// First page number
    pub start_page: u32,
    /// Optional page size parameter name
    pub page_size_param: Option<String>,
    /// Page size value
    pub page_size: Option<u32>,
    /// Stop condition
    pub stop_condition: StopCondition,
}

impl PageNumberPaginator {
    /// Create a new page number paginator starting at the given page
    pub fn new(page_param: impl Into<String>, start_page: u32) -> Self {
        Self {
            page_param: page_param.into(),
            start_page,
            page_size_param: None,
            page_size: None,
            stop_condition: StopCondition::EmptyPage,
        }
    }

    /// Set the page size parameter
    #[must_use]
    pub fn with_page_size(mut self, param: impl Into<String>, size: u32) -> Self {
        self.page_size_param = Some(param.into());
        self.page_size = Some(size);
        self
    }

    /// Set the stop condition
    #[must_use]
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }

    fn params_for(&self, page: u32) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert(self.page_param.clone(), page.to_string());
        if let (Some(param), Some(size)) = (&self.page_size_param, self.page_size) {
            params.insert(param.clone(), size.to_string());
        }
        params
    }
}

impl Paginator for PageNumberPaginator {
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let page = if state.page == 0 {
            self.start_page
        } else {
            state.page
        };
        self.params_for(page)
    }

    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        if state.page == 0 {
            state.page = self.start_page;
        }
        state.add_fetched(records_count as u64);

        if check_stop_condition(&self.stop_condition, body, records_count, state) {
            state.mark_done();
            return NextPage::Done;
        }

        // A short page means the source ran out of records
        if let Some(size) = self.page_size {
            if records_count < size as usize {
                state.mark_done();
                return NextPage::Done;
            }
        }

        if records_count == 0 {
            state.mark_done();
            return NextPage::Done;
        }

        state.next_page();
        NextPage::with_params(self.params_for(state.page))
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - the endpoint returns everything in one response
#[derive(Debug, Clone, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn initial_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn process_response(
        &self,
        _body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);
        state.mark_done();
        NextPage::Done
    }
}
