//! Sync engine
//!
//! Drives one stream's extraction to completion: one GET per
//! iteration, records yielded in page order, bookmark persisted after
//! each page, position advanced until the paginator reports the end.
//!
//! Messages are appended to the caller's buffer as they are produced;
//! a mid-stream failure leaves the records already extracted (and
//! their checkpoints) in place.

mod types;

pub use types::{Message, SyncConfig, SyncStats};

use crate::decode::field_value;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{NextPage, PaginationState};
use crate::partition::{PartitionRouter, PartitionValue};
use crate::state::StateManager;
use crate::streams::StreamDef;
use crate::template::{self, PathContext};
use tracing::{debug, info};

/// Sync engine for one tap run
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// State manager (single writer for bookmarks)
    state: StateManager,
    /// Sync configuration
    config: SyncConfig,
    /// Counters
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient, state: StateManager) -> Self {
        Self {
            client,
            state,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Sync a single (unpartitioned) stream, or one partition of one
    ///
    /// Messages are appended to `out` as they are produced.
    pub async fn sync_stream(
        &mut self,
        stream: &StreamDef,
        partition: Option<&PartitionValue>,
        out: &mut Vec<Message>,
    ) -> Result<()> {
        let mut ctx = PathContext::new();
        if let Some(p) = partition {
            for (key, value) in &p.values {
                ctx.insert(key, value);
            }
        }
        let rendered_path = template::render(stream.path, &ctx)?;

        let bookmark = self.load_bookmark(stream, partition).await;
        let mut max_emitted = bookmark.clone();

        let extractor = stream.extractor();
        let paginator = stream.paginator();
        let mut pagination_state = PaginationState::new();
        let mut page_params = paginator.initial_params(&pagination_state);
        let mut page_count = 0u32;

        info!(stream = stream.name, path = %rendered_path, "starting sync");

        loop {
            let mut req_config = RequestConfig::new();

            for (key, value) in stream.params {
                req_config = req_config.query(*key, *value);
            }

            // Push the saved bookmark to the source so already-seen
            // records are not re-fetched
            if let (Some(replication), Some(saved)) = (&stream.replication, &bookmark) {
                if let Some(param) = replication.request_param {
                    req_config = req_config.query(param, saved);
                }
            }

            for (key, value) in &page_params {
                req_config = req_config.query(key, value);
            }

            let response = self.client.get_with_config(&rendered_path, req_config).await?;
            let body = response.text().await.map_err(|e| {
                crate::error::Error::decode(format!("Failed to read response body: {e}"))
            })?;

            // Malformed JSON is fatal for this stream
            let (page, records) = extractor.decode(&body)?;
            let record_count = records.len();

            page_count += 1;
            self.stats.add_page();
            debug!(
                stream = stream.name,
                page = page_count,
                records = record_count,
                "fetched page"
            );

            for record in records.iter() {
                if let Some(replication) = &stream.replication {
                    let value = field_value(record, replication.key);

                    // Strictly greater than the saved bookmark: the
                    // request param is inclusive on the API side
                    if let (Some(saved), Some(v)) = (&bookmark, &value) {
                        if v.as_str() <= saved.as_str() {
                            continue;
                        }
                    }

                    if let Some(v) = value {
                        if max_emitted.as_deref().map_or(true, |m| v.as_str() > m) {
                            max_emitted = Some(v);
                        }
                    }
                }

                out.push(Message::record(stream.name, record.clone()));
                self.stats.add_records(1);
            }

            let next = paginator.process_response(&page, record_count, &mut pagination_state);

            // Checkpoint the bookmark after every page
            if stream.replication.is_some() && max_emitted != bookmark {
                if let Some(value) = &max_emitted {
                    self.save_bookmark(stream, partition, value.clone()).await?;
                }
            }
            if self.config.emit_state_per_page {
                out.push(Message::state(self.state.to_value().await?));
            }

            match next {
                NextPage::Continue { query_params } => page_params = query_params,
                NextPage::Done => break,
            }
        }

        info!(
            stream = stream.name,
            pages = page_count,
            total = pagination_state.total_fetched,
            "completed sync"
        );

        if stream.replication.is_some() {
            out.push(Message::state(self.state.to_value().await?));
        }

        Ok(())
    }

    /// Sync a partitioned stream across all partitions of a router
    ///
    /// Completed partitions are skipped so an interrupted run resumes
    /// where it stopped; once every partition is complete the flags are
    /// reset so the next run extracts everything again.
    pub async fn sync_partitioned_stream(
        &mut self,
        stream: &StreamDef,
        router: &dyn PartitionRouter,
        out: &mut Vec<Message>,
    ) -> Result<()> {
        let partitions = router.partitions()?;
        debug!(
            stream = stream.name,
            partitions = partitions.len(),
            "resolved partitions"
        );

        let mut all_completed = !partitions.is_empty();
        for partition in &partitions {
            if !self
                .state
                .is_partition_completed(stream.name, &partition.id)
                .await
            {
                all_completed = false;
                break;
            }
        }
        if all_completed {
            self.state.reset_partition_completion(stream.name).await?;
        }

        for partition in partitions {
            if self
                .state
                .is_partition_completed(stream.name, &partition.id)
                .await
            {
                debug!(
                    stream = stream.name,
                    partition = %partition.id,
                    "skipping completed partition"
                );
                continue;
            }

            self.sync_stream(stream, Some(&partition), out).await?;
            self.state
                .mark_partition_completed(stream.name, &partition.id)
                .await?;
            self.stats.add_partition();
        }

        Ok(())
    }

    /// Record a completed stream in the stats
    pub fn finish_stream(&mut self) {
        self.stats.add_stream();
    }

    /// Record a failed stream in the stats
    pub fn record_error(&mut self) {
        self.stats.add_error();
    }

    async fn load_bookmark(
        &self,
        stream: &StreamDef,
        partition: Option<&PartitionValue>,
    ) -> Option<String> {
        if stream.replication.is_none() {
            return None;
        }
        match partition {
            Some(p) => self.state.get_partition_bookmark(stream.name, &p.id).await,
            None => self.state.get_bookmark(stream.name).await,
        }
    }

    async fn save_bookmark(
        &self,
        stream: &StreamDef,
        partition: Option<&PartitionValue>,
        value: String,
    ) -> Result<()> {
        match partition {
            Some(p) => {
                self.state
                    .set_partition_bookmark(stream.name, &p.id, value)
                    .await
            }
            None => self.state.set_bookmark(stream.name, value).await,
        }
    }
}

/// Collect the record payloads out of a message buffer
///
/// Used by the runner to feed parent records into child-stream routers.
pub fn record_values(messages: &[Message], stream: &str) -> Vec<serde_json::Value> {
    messages
        .iter()
        .filter_map(|m| match m {
            Message::Record {
                stream: s, record, ..
            } if s == stream => Some(record.clone()),
            _ => None,
        })
        .collect()
}
