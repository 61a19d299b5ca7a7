pub mod tamm_kreiz;
pub mod types;

use async_trait::async_trait;
use tk_core::Result;
use types::{TkFullEvent, TkShortEvent};

pub use tamm_kreiz::TammKreizApi;

/// Port to the source provider: a lightweight index for staleness detection
/// and a per-id detail endpoint.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_event_index(&self) -> Result<Vec<TkShortEvent>>;
    async fn fetch_event_details(&self, id: &str) -> Result<TkFullEvent>;
}
