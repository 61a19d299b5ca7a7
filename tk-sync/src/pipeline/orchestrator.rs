use crate::apis::EventSource;
use crate::config::SyncConfig;
use crate::pipeline::aggregate::Aggregator;
use crate::pipeline::change_set::resolve_change_set;
use crate::pipeline::fetch::fetch_details;
use chrono::Utc;
use std::sync::Arc;
use tk_core::storage::Storage;
use tk_core::Result;
use tracing::{info, instrument};

/// Outcome of one sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Entries seen in the remote index.
    pub scanned: usize,
    /// Entries refreshed this run.
    pub updated: usize,
}

impl SyncReport {
    pub fn message(&self) -> String {
        format!("{} events processed successfully", self.updated)
    }
}

/// Drives one end-to-end sync run. Runs are idempotent through upsert
/// semantics; overlapping runs are tolerated, not coordinated. Writes
/// issued before a later failure are not undone.
pub struct SyncRunner {
    source: Arc<dyn EventSource>,
    storage: Arc<dyn Storage>,
    config: SyncConfig,
}

impl SyncRunner {
    pub fn new(source: Arc<dyn EventSource>, storage: Arc<dyn Storage>, config: SyncConfig) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<SyncReport> {
        let remote = self.source.fetch_event_index().await?;
        let local_index = self.storage.event_index().await?;

        let changed = resolve_change_set(&remote, &local_index, Utc::now(), &self.config);
        info!("updating or creating {} events", changed.len());

        let ids: Vec<String> = changed.iter().map(|event| event.eve_id.clone()).collect();
        let details = fetch_details(&self.source, &ids, self.config.fetch_chunk_size).await?;

        let batch = Aggregator::new(self.storage.as_ref(), self.config.category_mode)
            .aggregate(&details)
            .await?;

        // Entity tables land before association tables so the join rows
        // have their foreign keys in place.
        let (events, artists, organizers) = tokio::join!(
            self.storage.upsert_events(&batch.events),
            self.storage.upsert_artists(&batch.artists),
            self.storage.upsert_organizers(&batch.organizers),
        );
        events?;
        artists?;
        organizers?;

        let (participations, event_organizers) = tokio::join!(
            self.storage
                .upsert_artist_participations(&batch.artist_participations),
            self.storage.upsert_event_organizers(&batch.event_organizers),
        );
        participations?;
        event_organizers?;

        Ok(SyncReport {
            scanned: remote.len(),
            updated: batch.events.len(),
        })
    }
}
