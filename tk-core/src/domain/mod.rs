use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type label assigned to categories created lazily during a sync run.
pub const DEFAULT_CATEGORY_TYPE: &str = "breton";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    /// Last-modified stamp as reported by the source, stored verbatim.
    /// Staleness detection compares these strings lexicographically.
    pub last_update: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub price: String,
    pub town: String,
    pub town_latitude: f64,
    pub town_longitude: f64,
    pub department: Option<i32>,
    pub place: String,
    pub place_address: String,
    pub place_infos: String,
    pub place_latitude: f64,
    pub place_longitude: f64,
    pub country_code: String,
    pub country_name: String,
    pub category: i64,
    pub sub_category: String,
    pub is_covered_place: bool,
    pub has_car_park: bool,
    pub has_parquet_floor: bool,
    pub booking_url: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub is_partner: bool,
    pub partner_advantage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub website: String,
    pub soundcloud: String,
    pub facebook: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organizer {
    pub id: i64,
    pub name: String,
    pub website: String,
    pub phone_1: String,
    pub phone_2: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistParticipation {
    pub event_id: i64,
    pub artist_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOrganizer {
    pub event_id: i64,
    pub organizer_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCategory {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEventCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: String,
}
