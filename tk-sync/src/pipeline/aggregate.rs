use crate::apis::types::TkFullEvent;
use crate::config::CategoryMode;
use crate::pipeline::convert::{convert_artist, convert_event, convert_organizer, normalized_artist_id};
use std::collections::{HashMap, HashSet};
use tk_core::domain::*;
use tk_core::storage::Storage;
use tk_core::{Result, SyncError};
use tracing::debug;

/// Everything one run writes back: events plus per-batch-deduplicated
/// contributors and their association rows.
#[derive(Debug, Default)]
pub struct SyncBatch {
    pub events: Vec<Event>,
    pub artists: Vec<Artist>,
    pub organizers: Vec<Organizer>,
    pub artist_participations: Vec<ArtistParticipation>,
    pub event_organizers: Vec<EventOrganizer>,
}

/// Folds detail records into a [`SyncBatch`]. The category cache is the only
/// mutable state threaded through the fold; it lives and dies with this
/// aggregator, so the sequential fold needs no synchronization.
pub struct Aggregator<'a> {
    storage: &'a dyn Storage,
    mode: CategoryMode,
    categories: HashMap<String, i64>,
}

impl<'a> Aggregator<'a> {
    pub fn new(storage: &'a dyn Storage, mode: CategoryMode) -> Self {
        Self {
            storage,
            mode,
            categories: HashMap::new(),
        }
    }

    pub async fn aggregate(mut self, details: &[TkFullEvent]) -> Result<SyncBatch> {
        let mut batch = SyncBatch::default();
        let mut seen_artists = HashSet::new();
        let mut seen_organizers = HashSet::new();

        for detail in details {
            let category = self.resolve_category(detail).await?;
            let event = convert_event(detail, category)?;
            let event_id = event.id;
            batch.events.push(event);

            for artist in &detail.artistes {
                let artist_id = normalized_artist_id(artist)?;
                // First occurrence wins for the entity table; every
                // occurrence still gets its own participation row.
                if seen_artists.insert(artist_id) {
                    batch.artists.push(convert_artist(artist)?);
                }
                batch.artist_participations.push(ArtistParticipation {
                    event_id,
                    artist_id,
                });
            }

            for organizer in &detail.organisateurs {
                let converted = convert_organizer(organizer)?;
                let organizer_id = converted.id;
                if seen_organizers.insert(organizer_id) {
                    batch.organizers.push(converted);
                }
                batch.event_organizers.push(EventOrganizer {
                    event_id,
                    organizer_id,
                });
            }
        }

        debug!(
            "aggregated {} events, {} artists, {} organizers",
            batch.events.len(),
            batch.artists.len(),
            batch.organizers.len()
        );
        Ok(batch)
    }

    async fn resolve_category(&mut self, detail: &TkFullEvent) -> Result<i64> {
        match self.mode {
            CategoryMode::SubCategoryCode => detail.dpr_id.parse().map_err(|_| {
                SyncError::MalformedField(format!("event subcategory code: {:?}", detail.dpr_id))
            }),
            CategoryMode::ResolvedCategory => {
                if let Some(id) = self.categories.get(&detail.event_type) {
                    return Ok(*id);
                }

                let id = match self.storage.find_category(&detail.event_type).await? {
                    Some(id) => id,
                    None => {
                        self.storage
                            .insert_category(&NewEventCategory {
                                name: detail.event_type.clone(),
                                category_type: DEFAULT_CATEGORY_TYPE.to_string(),
                            })
                            .await?
                            .id
                    }
                };
                self.categories.insert(detail.event_type.clone(), id);
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hash::hash_string;
    use tk_core::storage::InMemoryStorage;

    fn detail(id: &str, artists: serde_json::Value, organizers: serde_json::Value) -> TkFullEvent {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "datemaj": "2024-01-02 10:00:00",
            "date": "2024-02-03",
            "heure": "21h00",
            "dpr_id": "1",
            "type": "Fest-Noz",
            "artistes": artists,
            "organisateurs": organizers
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn shared_artist_dedupes_but_keeps_both_participations() {
        let storage = InMemoryStorage::new();
        let details = vec![
            detail(
                "1",
                serde_json::json!([{ "id": "42", "lenom": "Startijenn" }]),
                serde_json::json!([]),
            ),
            detail(
                "2",
                serde_json::json!([{ "id": "42", "lenom": "Startijenn" }]),
                serde_json::json!([]),
            ),
        ];

        let batch = Aggregator::new(&storage, CategoryMode::SubCategoryCode)
            .aggregate(&details)
            .await
            .unwrap();

        assert_eq!(batch.artists.len(), 1);
        assert_eq!(batch.artists[0].id, 42);
        assert_eq!(
            batch.artist_participations,
            vec![
                ArtistParticipation { event_id: 1, artist_id: 42 },
                ArtistParticipation { event_id: 2, artist_id: 42 },
            ]
        );
    }

    #[tokio::test]
    async fn sentinel_artist_gets_hashed_identity() {
        let storage = InMemoryStorage::new();
        let details = vec![detail(
            "1",
            serde_json::json!([{ "id": -1, "lenom": "Fest Noz Band" }]),
            serde_json::json!([]),
        )];

        let batch = Aggregator::new(&storage, CategoryMode::SubCategoryCode)
            .aggregate(&details)
            .await
            .unwrap();

        let expected = i64::from(hash_string("Fest Noz Band"));
        assert_eq!(batch.artists[0].id, expected);
        assert_eq!(
            batch.artist_participations,
            vec![ArtistParticipation { event_id: 1, artist_id: expected }]
        );
    }

    #[tokio::test]
    async fn organizers_dedupe_symmetrically() {
        let storage = InMemoryStorage::new();
        let organizer = serde_json::json!([{ "id": "9", "libelle": "Cercle celtique" }]);
        let details = vec![
            detail("1", serde_json::json!([]), organizer.clone()),
            detail("2", serde_json::json!([]), organizer),
        ];

        let batch = Aggregator::new(&storage, CategoryMode::SubCategoryCode)
            .aggregate(&details)
            .await
            .unwrap();

        assert_eq!(batch.organizers.len(), 1);
        assert_eq!(batch.event_organizers.len(), 2);
    }

    #[tokio::test]
    async fn raw_mode_uses_subcategory_code() {
        let storage = InMemoryStorage::new();
        let batch = Aggregator::new(&storage, CategoryMode::SubCategoryCode)
            .aggregate(&[detail("1", serde_json::json!([]), serde_json::json!([]))])
            .await
            .unwrap();
        assert_eq!(batch.events[0].category, 1);
        assert!(storage.categories().is_empty());
    }

    #[tokio::test]
    async fn resolved_mode_creates_each_category_once() {
        let storage = InMemoryStorage::new();
        let details = vec![
            detail("1", serde_json::json!([]), serde_json::json!([])),
            detail("2", serde_json::json!([]), serde_json::json!([])),
        ];

        let batch = Aggregator::new(&storage, CategoryMode::ResolvedCategory)
            .aggregate(&details)
            .await
            .unwrap();

        let categories = storage.categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Fest-Noz");
        assert_eq!(categories[0].category_type, DEFAULT_CATEGORY_TYPE);
        assert_eq!(batch.events[0].category, categories[0].id);
        assert_eq!(batch.events[1].category, categories[0].id);
    }
}
