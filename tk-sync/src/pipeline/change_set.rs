use crate::apis::types::TkShortEvent;
use crate::config::SyncConfig;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;
use tracing::warn;

/// Computes the subset of remote entries needing a refresh: unknown ids and
/// entries whose source last-modified stamp is strictly newer than the
/// stored one. Both stamps are the same source field in ISO order, so the
/// comparison stays on raw strings. Remote order is preserved and the
/// result is capped per run.
pub fn resolve_change_set(
    remote: &[TkShortEvent],
    local_index: &HashMap<i64, String>,
    now: DateTime<Utc>,
    config: &SyncConfig,
) -> Vec<TkShortEvent> {
    let cutoff = config
        .recency_window_days
        .map(|days| now.date_naive() - Duration::days(days));

    remote
        .iter()
        .filter(|event| is_recent(event, cutoff) && is_stale(event, local_index))
        .take(config.max_events_per_run)
        .cloned()
        .collect()
}

fn is_stale(event: &TkShortEvent, local_index: &HashMap<i64, String>) -> bool {
    let id: i64 = match event.eve_id.parse() {
        Ok(id) => id,
        Err(_) => {
            warn!("skipping index entry with non-numeric id {:?}", event.eve_id);
            return false;
        }
    };

    match local_index.get(&id) {
        Some(last_update) => event.eve_datemaj > *last_update,
        None => true,
    }
}

/// Events already past the recency window are left alone; an unparseable
/// event date also excludes the entry.
fn is_recent(event: &TkShortEvent, cutoff: Option<NaiveDate>) -> bool {
    let Some(cutoff) = cutoff else {
        return true;
    };
    match NaiveDate::parse_from_str(event.eve_date.split_whitespace().next().unwrap_or(""), "%Y-%m-%d")
    {
        Ok(date) => date > cutoff,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stub(id: &str, datemaj: &str, date: &str) -> TkShortEvent {
        TkShortEvent {
            eve_id: id.to_string(),
            eve_datemaj: datemaj.to_string(),
            eve_date: date.to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn no_window() -> SyncConfig {
        SyncConfig {
            recency_window_days: None,
            ..SyncConfig::default()
        }
    }

    #[test]
    fn unknown_ids_are_included() {
        let remote = vec![stub("1", "2024-06-01 08:00:00", "2024-07-01")];
        let selected = resolve_change_set(&remote, &HashMap::new(), now(), &no_window());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].eve_id, "1");
    }

    #[test]
    fn up_to_date_entries_are_excluded() {
        let remote = vec![
            stub("1", "2024-06-01 08:00:00", "2024-07-01"),
            stub("2", "2024-05-01 08:00:00", "2024-07-02"),
        ];
        let local = HashMap::from([
            (1, "2024-06-01 08:00:00".to_string()),
            (2, "2024-04-30 08:00:00".to_string()),
        ]);
        let selected = resolve_change_set(&remote, &local, now(), &no_window());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].eve_id, "2");
    }

    #[test]
    fn remote_order_is_preserved_and_capped() {
        let remote: Vec<_> = (0..10)
            .map(|i| stub(&i.to_string(), "2024-06-01 08:00:00", "2024-07-01"))
            .collect();
        let config = SyncConfig {
            max_events_per_run: 4,
            recency_window_days: None,
            ..SyncConfig::default()
        };
        let selected = resolve_change_set(&remote, &HashMap::new(), now(), &config);
        let ids: Vec<_> = selected.iter().map(|e| e.eve_id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2", "3"]);
    }

    #[test]
    fn recency_window_drops_old_events() {
        let remote = vec![
            stub("1", "2024-06-01 08:00:00", "2024-03-01"),
            stub("2", "2024-06-01 08:00:00", "2024-07-01"),
        ];
        let config = SyncConfig {
            recency_window_days: Some(30),
            ..SyncConfig::default()
        };
        let selected = resolve_change_set(&remote, &HashMap::new(), now(), &config);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].eve_id, "2");
    }

    #[test]
    fn unparseable_event_date_is_excluded_when_window_active() {
        let remote = vec![stub("1", "2024-06-01 08:00:00", "???")];
        let config = SyncConfig {
            recency_window_days: Some(30),
            ..SyncConfig::default()
        };
        assert!(resolve_change_set(&remote, &HashMap::new(), now(), &config).is_empty());
    }

    #[test]
    fn non_numeric_ids_are_skipped() {
        let remote = vec![stub("abc", "2024-06-01 08:00:00", "2024-07-01")];
        assert!(resolve_change_set(&remote, &HashMap::new(), now(), &no_window()).is_empty());
    }
}
