use crate::common::error::Result;
use crate::domain::*;
use crate::storage::traits::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// In-memory storage implementation for development/testing.
#[derive(Default)]
pub struct InMemoryStorage {
    events: Arc<Mutex<HashMap<i64, Event>>>,
    artists: Arc<Mutex<HashMap<i64, Artist>>>,
    organizers: Arc<Mutex<HashMap<i64, Organizer>>>,
    artist_participations: Arc<Mutex<Vec<ArtistParticipation>>>,
    event_organizers: Arc<Mutex<Vec<EventOrganizer>>>,
    categories: Arc<Mutex<Vec<EventCategory>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().values().cloned().collect()
    }

    pub fn artists(&self) -> Vec<Artist> {
        self.artists.lock().unwrap().values().cloned().collect()
    }

    pub fn organizers(&self) -> Vec<Organizer> {
        self.organizers.lock().unwrap().values().cloned().collect()
    }

    pub fn artist_participations(&self) -> Vec<ArtistParticipation> {
        self.artist_participations.lock().unwrap().clone()
    }

    pub fn event_organizers(&self) -> Vec<EventOrganizer> {
        self.event_organizers.lock().unwrap().clone()
    }

    pub fn categories(&self) -> Vec<EventCategory> {
        self.categories.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn event_index(&self) -> Result<HashMap<i64, String>> {
        let events = self.events.lock().unwrap();
        Ok(events
            .values()
            .map(|event| (event.id, event.last_update.clone()))
            .collect())
    }

    async fn upsert_events(&self, events: &[Event]) -> Result<()> {
        let mut stored = self.events.lock().unwrap();
        for event in events {
            stored.insert(event.id, event.clone());
        }
        debug!("upserted {} events", events.len());
        Ok(())
    }

    async fn upsert_artists(&self, artists: &[Artist]) -> Result<()> {
        let mut stored = self.artists.lock().unwrap();
        for artist in artists {
            stored.insert(artist.id, artist.clone());
        }
        Ok(())
    }

    async fn upsert_organizers(&self, organizers: &[Organizer]) -> Result<()> {
        let mut stored = self.organizers.lock().unwrap();
        for organizer in organizers {
            stored.insert(organizer.id, organizer.clone());
        }
        Ok(())
    }

    async fn upsert_artist_participations(&self, rows: &[ArtistParticipation]) -> Result<()> {
        let mut stored = self.artist_participations.lock().unwrap();
        for row in rows {
            if !stored.contains(row) {
                stored.push(row.clone());
            }
        }
        Ok(())
    }

    async fn upsert_event_organizers(&self, rows: &[EventOrganizer]) -> Result<()> {
        let mut stored = self.event_organizers.lock().unwrap();
        for row in rows {
            if !stored.contains(row) {
                stored.push(row.clone());
            }
        }
        Ok(())
    }

    async fn find_category(&self, name: &str) -> Result<Option<i64>> {
        let categories = self.categories.lock().unwrap();
        Ok(categories
            .iter()
            .find(|category| category.name == name)
            .map(|category| category.id))
    }

    async fn insert_category(&self, category: &NewEventCategory) -> Result<EventCategory> {
        let mut categories = self.categories.lock().unwrap();
        let created = EventCategory {
            id: categories.len() as i64 + 1,
            name: category.name.clone(),
            category_type: category.category_type.clone(),
        };
        categories.push(created.clone());
        Ok(created)
    }
}
