use crate::apis::types::TkFullEvent;
use crate::apis::EventSource;
use std::sync::Arc;
use tk_core::{Result, SyncError};
use tracing::debug;

/// Fetches full records for the changed ids in fixed-size chunks: all
/// fetches within a chunk run concurrently, chunks proceed sequentially.
/// This bounds in-flight requests against the source API's informal rate
/// limits. Any single failed fetch aborts the run.
pub async fn fetch_details(
    source: &Arc<dyn EventSource>,
    ids: &[String],
    chunk_size: usize,
) -> Result<Vec<TkFullEvent>> {
    let mut details = Vec::with_capacity(ids.len());

    for chunk in ids.chunks(chunk_size.max(1)) {
        debug!("fetching details for {} events", chunk.len());

        let handles: Vec<_> = chunk
            .iter()
            .map(|id| {
                let source = Arc::clone(source);
                let id = id.clone();
                (
                    id.clone(),
                    tokio::spawn(async move { source.fetch_event_details(&id).await }),
                )
            })
            .collect();

        for (id, handle) in handles {
            let detail = handle.await.map_err(|err| SyncError::UpstreamFetch {
                id,
                message: format!("fetch task failed: {err}"),
            })??;
            details.push(detail);
        }
    }

    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::types::TkShortEvent;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EventSource for CountingSource {
        async fn fetch_event_index(&self) -> Result<Vec<TkShortEvent>> {
            Ok(Vec::new())
        }

        async fn fetch_event_details(&self, id: &str) -> Result<TkFullEvent> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if id == "boom" {
                return Err(SyncError::UpstreamFetch {
                    id: id.to_string(),
                    message: "no such event".to_string(),
                });
            }
            Ok(serde_json::from_value(serde_json::json!({
                "id": id,
                "datemaj": "2024-01-02 10:00:00",
                "date": "2024-02-03"
            }))
            .unwrap())
        }
    }

    #[tokio::test]
    async fn fetches_all_ids_in_order() {
        let source: Arc<dyn EventSource> = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let ids: Vec<String> = (1..=5).map(|i| i.to_string()).collect();

        let details = fetch_details(&source, &ids, 2).await.unwrap();
        let fetched: Vec<_> = details.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(fetched, ["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn single_failure_aborts_the_run() {
        let source: Arc<dyn EventSource> = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let ids = vec!["1".to_string(), "boom".to_string(), "3".to_string()];

        let result = fetch_details(&source, &ids, 10).await;
        assert!(matches!(result, Err(SyncError::UpstreamFetch { .. })));
    }
}
