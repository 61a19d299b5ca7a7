use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tk_core::{Result, SyncError};

/// The source reports wall-clock times in this civil timezone.
const SOURCE_TIMEZONE: Tz = chrono_tz::Europe::Paris;

/// Parses a source date plus an optional hour string into a UTC instant.
///
/// With an hour string, the date part is the first whitespace-separated
/// token and the hour goes through [`normalize_hour`]. Without one, the
/// date string itself carries full precision. Either way the composed
/// wall-clock time is resolved against the offset Europe/Paris observes on
/// that calendar date, so winter and summer events land on different
/// offsets.
pub fn parse_event_datetime(date: &str, hour: Option<&str>) -> Result<DateTime<Utc>> {
    let naive = match hour {
        Some(hour) => {
            let day = date.split_whitespace().next().unwrap_or(date);
            let day = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map_err(|_| invalid(date, Some(hour)))?;
            let time = NaiveTime::parse_from_str(&normalize_hour(hour), "%H:%M")
                .map_err(|_| invalid(date, Some(hour)))?;
            day.and_time(time)
        }
        None => parse_naive_datetime(date).ok_or_else(|| invalid(date, None))?,
    };

    match SOURCE_TIMEZONE.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Ok(instant.with_timezone(&Utc)),
        // Autumn fall-back repeats one wall-clock hour; take the earlier
        // offset. Spring-forward gaps have no valid instant at all.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(invalid(date, hour)),
    }
}

fn parse_naive_datetime(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|day| day.and_time(NaiveTime::MIN))
        })
}

/// Normalizes the source's free-form hour notation ("21h00", "14H", "9h30",
/// "18:30") to `HH:MM`. A blank hour means local midnight.
fn normalize_hour(hour: &str) -> String {
    if hour.trim().is_empty() {
        return "00:00".to_string();
    }

    let mut normalized = hour.replace(' ', "").replace(['h', 'H'], ":");
    if normalized.ends_with(':') {
        normalized.push_str("00");
    } else if !normalized.contains(':') {
        normalized.push_str(":00");
    }
    normalized
}

fn invalid(date: &str, hour: Option<&str>) -> SyncError {
    SyncError::InvalidDate(match hour {
        Some(hour) => format!("{date} {hour}"),
        None => date.to_string(),
    })
}
