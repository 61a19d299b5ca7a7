use crate::common::error::{Result, SyncError};
use crate::domain::*;
use crate::storage::traits::Storage;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Storage gateway over the Supabase PostgREST endpoint.
///
/// Config via env:
/// - SUPABASE_URL (e.g., https://xyzcompany.supabase.co)
/// - SUPABASE_ANON_KEY
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct EventIndexRow {
    id: i64,
    last_update: String,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

impl SupabaseStorage {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL")?;
        let key = std::env::var("SUPABASE_ANON_KEY")?;
        Ok(Self::new(url.trim_end_matches('/').to_string(), key))
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let resp = self
            .authed(self.client.get(self.table_url(table)).query(query))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Storage {
                table,
                operation: "select",
                message: format!("{status} - {body}"),
            });
        }
        Ok(resp.json().await?)
    }

    /// Batch upsert keyed on the table's primary key. `merge-duplicates`
    /// makes re-running a sync over already-stored rows idempotent.
    async fn upsert<T: Serialize>(&self, table: &'static str, rows: &[T]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        debug!("upserting {} rows into {}", rows.len(), table);

        let resp = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(rows)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Storage {
                table,
                operation: "upsert",
                message: format!("{status} - {body}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for SupabaseStorage {
    async fn event_index(&self) -> Result<HashMap<i64, String>> {
        let rows: Vec<EventIndexRow> = self
            .select("Event", &[("select", "id,last_update")])
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.id, row.last_update))
            .collect())
    }

    async fn upsert_events(&self, events: &[Event]) -> Result<()> {
        self.upsert("Event", events).await
    }

    async fn upsert_artists(&self, artists: &[Artist]) -> Result<()> {
        self.upsert("Artist", artists).await
    }

    async fn upsert_organizers(&self, organizers: &[Organizer]) -> Result<()> {
        self.upsert("Organizer", organizers).await
    }

    async fn upsert_artist_participations(&self, rows: &[ArtistParticipation]) -> Result<()> {
        self.upsert("ArtistParticipation", rows).await
    }

    async fn upsert_event_organizers(&self, rows: &[EventOrganizer]) -> Result<()> {
        self.upsert("EventOrganizer", rows).await
    }

    async fn find_category(&self, name: &str) -> Result<Option<i64>> {
        let filter = format!("eq.{name}");
        let rows: Vec<IdRow> = self
            .select("EventCategory", &[("select", "id"), ("name", &filter)])
            .await?;
        Ok(rows.first().map(|row| row.id))
    }

    async fn insert_category(&self, category: &NewEventCategory) -> Result<EventCategory> {
        let resp = self
            .authed(self.client.post(self.table_url("EventCategory")))
            .header("Prefer", "return=representation")
            .json(&[category])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Storage {
                table: "EventCategory",
                operation: "insert",
                message: format!("{status} - {body}"),
            });
        }

        let mut rows: Vec<EventCategory> = resp.json().await?;
        rows.pop().ok_or_else(|| SyncError::Storage {
            table: "EventCategory",
            operation: "insert",
            message: "insert returned no representation".to_string(),
        })
    }
}
