use crate::common::error::Result;
use crate::domain::*;
use async_trait::async_trait;
use std::collections::HashMap;

/// Storage gateway for the five sync tables plus the category lookup.
///
/// Implementations expose batch upserts keyed by primary id; a run issues
/// entity-table writes before association-table writes so foreign keys
/// resolve.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Lightweight local index used for staleness detection: event id mapped
    /// to its stored last-update stamp.
    async fn event_index(&self) -> Result<HashMap<i64, String>>;

    async fn upsert_events(&self, events: &[Event]) -> Result<()>;
    async fn upsert_artists(&self, artists: &[Artist]) -> Result<()>;
    async fn upsert_organizers(&self, organizers: &[Organizer]) -> Result<()>;
    async fn upsert_artist_participations(&self, rows: &[ArtistParticipation]) -> Result<()>;
    async fn upsert_event_organizers(&self, rows: &[EventOrganizer]) -> Result<()>;

    /// Category lookup by name; `None` when no row exists yet.
    async fn find_category(&self, name: &str) -> Result<Option<i64>>;
    async fn insert_category(&self, category: &NewEventCategory) -> Result<EventCategory>;
}
