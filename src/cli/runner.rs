//! CLI runner - executes commands

use crate::auth::ApiKeyAuthenticator;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{self, TapConfig};
use crate::engine::{record_values, Message, SyncConfig, SyncEngine};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::messages;
use crate::partition::{ListRouter, ParentRouter};
use crate::state::StateManager;
use crate::streams::{self, Partitioning, StreamDef};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Instant;
use tracing::warn;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(),
            Commands::Check => self.check().await,
            Commands::Discover => self.discover(),
            Commands::Streams => self.streams(),
            Commands::Read {
                streams,
                state_per_page,
            } => self.read(streams.as_deref(), *state_per_page).await,
        }
    }

    /// Load configuration (inline JSON takes precedence)
    fn load_config(&self) -> Result<TapConfig> {
        if let Some(json_str) = &self.cli.config_json {
            return TapConfig::from_json(json_str);
        }

        if let Some(path) = &self.cli.config {
            return TapConfig::from_file(path);
        }

        Err(Error::config(
            "Config not specified (use --config or --config-json)",
        ))
    }

    /// Load state (inline JSON takes precedence)
    fn load_state(&self) -> Result<StateManager> {
        if let Some(state_json) = &self.cli.state_json {
            StateManager::from_json(state_json)
        } else if let Some(path) = &self.cli.state {
            StateManager::from_file(path)
        } else {
            Ok(StateManager::in_memory())
        }
    }

    /// Build an authenticated HTTP client from the tap config
    fn build_client(config: &TapConfig) -> Result<HttpClient> {
        let authenticator = ApiKeyAuthenticator::new(config.api_key.clone())?;
        Ok(HttpClient::with_auth(
            HttpClientConfig::from_tap(config),
            authenticator,
        ))
    }

    /// Print the configuration schema
    fn spec(&self) -> Result<()> {
        self.output_message(&json!({
            "type": "SPEC",
            "spec": config::config_schema(),
        }));
        Ok(())
    }

    /// Check connection by fetching the caller's own user
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = Self::build_client(&config)?;

        match client.get_json::<Value>("/users/me").await {
            Ok(me) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "SUCCEEDED",
                        "message": format!(
                            "Connection successful (organization {})",
                            me["organizationId"].as_str().unwrap_or("unknown")
                        )
                    }
                }));
            }
            Err(e) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "FAILED",
                        "message": format!("Connection failed: {e}")
                    }
                }));
            }
        }

        Ok(())
    }

    /// Emit the catalog
    fn discover(&self) -> Result<()> {
        let streams: Vec<Value> = streams::catalog()
            .iter()
            .map(|stream| {
                let primary_key: Vec<Vec<String>> = stream
                    .primary_key
                    .iter()
                    .map(|k| vec![(*k).to_string()])
                    .collect();

                json!({
                    "name": stream.name,
                    "json_schema": stream.schema.to_json(),
                    "supported_sync_modes": if stream.replication.is_some() {
                        vec!["full_table", "incremental"]
                    } else {
                        vec!["full_table"]
                    },
                    "default_cursor_field": stream
                        .replication
                        .as_ref()
                        .map(|r| vec![r.key]),
                    "source_defined_primary_key": primary_key,
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "CATALOG",
            "catalog": { "streams": streams }
        }));

        Ok(())
    }

    /// List stream names
    fn streams(&self) -> Result<()> {
        let names: Vec<&str> = streams::catalog().iter().map(|s| s.name).collect();

        self.output_message(&json!({
            "type": "STREAMS",
            "streams": names,
        }));

        Ok(())
    }

    /// Read data
    async fn read(&self, stream_filter: Option<&str>, state_per_page: bool) -> Result<()> {
        let sync_start = Instant::now();
        let config = self.load_config()?;
        let state = self.load_state()?;
        let client = Self::build_client(&config)?;

        let selected = Self::select_streams(stream_filter)?;

        let sync_config = SyncConfig::new().with_state_per_page(state_per_page);
        let mut engine = SyncEngine::new(client, state).with_config(sync_config);

        // Organization ids come from config, or from the caller's own
        // user when the configured list is empty. Only resolved when an
        // organization-scoped stream is selected.
        let needs_organizations = selected
            .iter()
            .any(|s| matches!(s.partitioning, Partitioning::Organization));
        let organization_ids = if needs_organizations {
            self.resolve_organization_ids(&config).await?
        } else {
            Vec::new()
        };

        let mut parent_cache: HashMap<String, Vec<Value>> = HashMap::new();
        let mut stream_results: Vec<Value> = Vec::new();
        let mut failed = 0usize;

        let mut total_records = 0usize;

        for stream in &selected {
            let stream_start = Instant::now();

            self.output_message(&messages::log_message(
                crate::types::LogLevel::Info,
                &format!("Starting sync for stream: {}", stream.name),
            ));
            self.output_message(&messages::schema_message(stream));

            let mut msgs = Vec::new();
            let sync_result = self
                .sync_one_stream(&mut engine, stream, &organization_ids, &mut parent_cache, &mut msgs)
                .await;

            // Cache parent records before the buffer is consumed
            if streams::catalog().iter().any(|s| s.parent_stream() == Some(stream.name)) {
                parent_cache.insert(stream.name.to_string(), record_values(&msgs, stream.name));
            }

            for msg in &msgs {
                self.output_message(&messages::envelope(msg));
            }

            let duration_ms = stream_start.elapsed().as_millis() as u64;
            let stream_records = msgs.iter().filter(|m| m.is_record()).count();
            total_records += stream_records;

            match sync_result {
                Ok(()) => {
                    engine.finish_stream();
                    stream_results.push(json!({
                        "stream": stream.name,
                        "status": "SUCCESS",
                        "records_synced": stream_records,
                        "duration_ms": duration_ms,
                    }));
                }
                Err(e) => {
                    // Rejected credentials will fail every stream;
                    // stop immediately
                    if e.is_auth() {
                        self.output_message(&messages::log_message(
                            crate::types::LogLevel::Error,
                            &format!("Authentication failed: {e}"),
                        ));
                        return Err(e);
                    }

                    engine.record_error();
                    failed += 1;
                    warn!(stream = stream.name, error = %e, "stream failed");
                    self.output_message(&messages::log_message(
                        crate::types::LogLevel::Error,
                        &format!("Error syncing stream {}: {e}", stream.name),
                    ));
                    stream_results.push(json!({
                        "stream": stream.name,
                        "status": "FAILED",
                        "error": e.to_string(),
                        "records_synced": stream_records,
                        "duration_ms": duration_ms,
                    }));
                }
            }
        }

        // Final state, so the caller can persist and resume
        let final_state = engine.state().to_value().await?;
        self.output_message(&messages::state_message(&final_state));

        let total_duration_ms = sync_start.elapsed().as_millis() as u64;
        let succeeded = stream_results.len() - failed;
        self.output_message(&json!({
            "type": "SYNC_SUMMARY",
            "summary": {
                "status": if failed == 0 { "SUCCEEDED" } else if succeeded == 0 { "FAILED" } else { "PARTIAL" },
                "tap": "tap-tally",
                "total_records": total_records,
                "total_streams": stream_results.len(),
                "successful_streams": succeeded,
                "failed_streams": failed,
                "duration_ms": total_duration_ms,
                "streams": stream_results,
            }
        }));

        if failed > 0 && succeeded == 0 {
            return Err(Error::Other("all selected streams failed".to_string()));
        }

        Ok(())
    }

    /// Sync one stream, routing by its partitioning declaration
    async fn sync_one_stream(
        &self,
        engine: &mut SyncEngine,
        stream: &StreamDef,
        organization_ids: &[String],
        parent_cache: &mut HashMap<String, Vec<Value>>,
        out: &mut Vec<Message>,
    ) -> Result<()> {
        match &stream.partitioning {
            Partitioning::None => engine.sync_stream(stream, None, out).await,
            Partitioning::Organization => {
                let router = ListRouter::new(organization_ids.to_vec(), "organizationId");
                engine.sync_partitioned_stream(stream, &router, out).await
            }
            Partitioning::Parent {
                parent,
                parent_key,
                field,
            } => {
                let parent_records = match parent_cache.get(*parent) {
                    Some(records) => records.clone(),
                    None => {
                        let records = Self::fetch_parent_records(engine, parent).await?;
                        parent_cache.insert((*parent).to_string(), records.clone());
                        records
                    }
                };

                let router = ParentRouter::new(parent_records, *parent_key, *field);
                engine.sync_partitioned_stream(stream, &router, out).await
            }
        }
    }

    /// Fetch a parent stream's records without emitting them
    ///
    /// Used when a child stream is selected but its parent is not.
    async fn fetch_parent_records(engine: &mut SyncEngine, parent: &str) -> Result<Vec<Value>> {
        let parent_def = streams::find(parent).ok_or_else(|| Error::StreamNotFound {
            stream: parent.to_string(),
        })?;

        let mut scratch = Vec::new();
        engine.sync_stream(&parent_def, None, &mut scratch).await?;
        Ok(record_values(&scratch, parent))
    }

    /// Resolve the organization ids to partition by
    async fn resolve_organization_ids(&self, config: &TapConfig) -> Result<Vec<String>> {
        if !config.organization_ids.is_empty() {
            return Ok(config.organization_ids.clone());
        }

        let client = Self::build_client(config)?;
        let me: Value = client.get_json("/users/me").await?;
        let organization_id = me["organizationId"].as_str().ok_or_else(|| {
            Error::Other("/users/me response has no organizationId".to_string())
        })?;

        Ok(vec![organization_id.to_string()])
    }

    /// Resolve the selected streams, in catalog order
    fn select_streams(filter: Option<&str>) -> Result<Vec<StreamDef>> {
        let catalog = streams::catalog();

        let Some(filter) = filter else {
            return Ok(catalog);
        };

        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        for name in &names {
            if !catalog.iter().any(|s| s.name == *name) {
                return Err(Error::StreamNotFound {
                    stream: (*name).to_string(),
                });
            }
        }

        Ok(catalog
            .into_iter()
            .filter(|s| names.contains(&s.name))
            .collect())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_streams_default_is_full_catalog() {
        let selected = Runner::select_streams(None).unwrap();
        assert_eq!(selected.len(), streams::catalog().len());
    }

    #[test]
    fn test_select_streams_filter_keeps_catalog_order() {
        let selected = Runner::select_streams(Some("submissions,forms")).unwrap();
        let names: Vec<_> = selected.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["forms", "submissions"]);
    }

    #[test]
    fn test_select_streams_unknown_name() {
        let err = Runner::select_streams(Some("forms,bogus")).unwrap_err();
        assert!(matches!(
            err,
            Error::StreamNotFound { ref stream } if stream == "bogus"
        ));
    }
}
