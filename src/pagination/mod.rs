//! Pagination
//!
//! Position logic for paginated endpoints. The sync engine owns the
//! request loop; a `Paginator` only decides which query parameters the
//! next request needs and when the sequence is finished.

mod strategies;
mod types;

pub use strategies::{NoPaginator, PageNumberPaginator};
pub use types::{check_stop_condition, NextPage, PaginationState, Paginator, StopCondition};
