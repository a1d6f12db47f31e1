//! Stream declarations
//!
//! The tap's catalog: each supported resource type with its endpoint,
//! records path, schema, primary key, pagination, partitioning, and
//! replication key. The engine consumes these declarations; nothing in
//! here talks to the network.

mod definitions;

pub use definitions::catalog;

use crate::decode::RecordExtractor;
use crate::pagination::{NoPaginator, PageNumberPaginator, Paginator, StopCondition};
use crate::schema::JsonSchema;
use crate::types::SyncMode;

/// Query parameter name for page numbers on the Tally API
pub const PAGE_PARAM: &str = "page";
/// Query parameter name for page sizes on the Tally API
pub const LIMIT_PARAM: &str = "limit";
/// First page number
pub const START_PAGE: u32 = 1;

/// Pagination declared by a stream
#[derive(Debug, Clone)]
pub enum Pagination {
    /// Single request returns everything
    None,
    /// `page`-numbered requests starting at 1
    PageNumber {
        /// Optional `limit` page size
        page_size: Option<u32>,
        /// Condition that ends the sequence
        stop: StopCondition,
    },
}

/// Partitioning declared by a stream
#[derive(Debug, Clone)]
pub enum Partitioning {
    /// One extraction for the whole source
    None,
    /// One extraction per configured organization id
    Organization,
    /// One extraction per record of a parent stream
    Parent {
        /// Parent stream name
        parent: &'static str,
        /// Field to read from each parent record
        parent_key: &'static str,
        /// Placeholder it fills in this stream's path
        field: &'static str,
    },
}

/// Incremental replication declared by a stream
#[derive(Debug, Clone)]
pub struct Replication {
    /// Record field carrying the replication value
    pub key: &'static str,
    /// Query parameter used to push the bookmark to the API, if any.
    ///
    /// The API treats it as inclusive, so the engine still applies a
    /// strict `> bookmark` guard on emitted records.
    pub request_param: Option<&'static str>,
}

/// One extractable stream
#[derive(Debug, Clone)]
pub struct StreamDef {
    /// Stream name
    pub name: &'static str,
    /// Endpoint path, possibly with `{placeholder}` segments
    pub path: &'static str,
    /// Fixed query parameters for every request
    pub params: &'static [(&'static str, &'static str)],
    /// Path to the records array inside a page
    pub records_path: Option<&'static str>,
    /// Primary key fields
    pub primary_key: &'static [&'static str],
    /// Pagination declaration
    pub pagination: Pagination,
    /// Partitioning declaration
    pub partitioning: Partitioning,
    /// Incremental replication, if supported
    pub replication: Option<Replication>,
    /// Record schema
    pub schema: JsonSchema,
}

impl StreamDef {
    /// Build the record extractor for this stream
    pub fn extractor(&self) -> RecordExtractor {
        match self.records_path {
            Some(path) => RecordExtractor::with_path(path),
            None => RecordExtractor::root(),
        }
    }

    /// Build a fresh paginator for this stream
    pub fn paginator(&self) -> Box<dyn Paginator> {
        match &self.pagination {
            Pagination::None => Box::new(NoPaginator),
            Pagination::PageNumber { page_size, stop } => {
                let mut paginator = PageNumberPaginator::new(PAGE_PARAM, START_PAGE)
                    .with_stop_condition(stop.clone());
                if let Some(size) = page_size {
                    paginator = paginator.with_page_size(LIMIT_PARAM, *size);
                }
                Box::new(paginator)
            }
        }
    }

    /// Replication mode of this stream
    pub fn sync_mode(&self) -> SyncMode {
        if self.replication.is_some() {
            SyncMode::Incremental
        } else {
            SyncMode::FullTable
        }
    }

    /// Name of the parent stream this one depends on, if any
    pub fn parent_stream(&self) -> Option<&'static str> {
        match self.partitioning {
            Partitioning::Parent { parent, .. } => Some(parent),
            _ => None,
        }
    }
}

/// Look up a stream by name
pub fn find(name: &str) -> Option<StreamDef> {
    catalog().into_iter().find(|s| s.name == name)
}
