use crate::apis::types::{TkEventIndex, TkFullEvent, TkShortEvent};
use crate::apis::EventSource;
use async_trait::async_trait;
use tk_core::{Result, SyncError};
use tracing::{info, instrument};

const DEFAULT_BASE_URL: &str = "https://kasour.tamm-kreiz.bzh/app";

/// HTTP client for the Tamm Kreiz public API.
pub struct TammKreizApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for TammKreizApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TammKreizApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        match std::env::var("TAMM_KREIZ_BASE_URL") {
            Ok(url) => Self::new(url.trim_end_matches('/').to_string()),
            Err(_) => Self::default(),
        }
    }
}

#[async_trait]
impl EventSource for TammKreizApi {
    #[instrument(skip(self))]
    async fn fetch_event_index(&self) -> Result<Vec<TkShortEvent>> {
        let url = format!("{}/getevents.php?type_periode=all", self.base_url);
        let index: TkEventIndex = self.client.get(&url).send().await?.json().await?;

        info!("fetched {} events from Tamm Kreiz", index.evenements.len());
        Ok(index.evenements)
    }

    #[instrument(skip(self))]
    async fn fetch_event_details(&self, id: &str) -> Result<TkFullEvent> {
        let url = format!("{}/v4/getevent.php?id={}", self.base_url, id);
        let payload: serde_json::Value = self.client.get(&url).send().await?.json().await?;

        // An unknown or invalid id comes back as a JSON object with a
        // `message` field instead of an event record.
        if let Some(message) = payload.get("message").and_then(|m| m.as_str()) {
            return Err(SyncError::UpstreamFetch {
                id: id.to_string(),
                message: message.to_string(),
            });
        }

        Ok(serde_json::from_value(payload)?)
    }
}
