use crate::apis::types::TkFullEvent;
use crate::util::datetime::parse_event_datetime;
use tk_core::domain::Event;
use tk_core::{Result, SyncError};

const THUMBNAIL_BASE: &str =
    "https://www.tamm-kreiz.bzh/vuhez/media/evenements/affiches_retaillees";

/// Maps a source event onto the normalized row. Pure except for the clock
/// math in [`parse_event_datetime`]; the category column is decided by the
/// caller (raw subcategory code or a resolved category id).
pub fn convert_event(event: &TkFullEvent, category: i64) -> Result<Event> {
    let id: i64 = event
        .id
        .parse()
        .map_err(|_| SyncError::MalformedField(format!("event id: {:?}", event.id)))?;

    let town_latitude = parse_coordinate(&event.latitude).unwrap_or(0.0);
    let town_longitude = parse_coordinate(&event.longitude).unwrap_or(0.0);

    Ok(Event {
        id,
        last_update: event.datemaj.clone(),
        date: parse_event_datetime(&event.date, Some(&event.heure))?,
        description: event.libelle.clone(),
        price: if event.prix_fr == "inconnu" {
            String::new()
        } else {
            event.prix_fr.clone()
        },
        town: event.ville.clone(),
        town_latitude,
        town_longitude,
        department: event.departement.parse().ok(),
        place: event.place.clone(),
        place_address: join_address(&event.adresse1, &event.adresse2),
        place_infos: event.infos.clone(),
        place_latitude: parse_coordinate(&event.place_latitude).unwrap_or(town_latitude),
        place_longitude: parse_coordinate(&event.place_longitude).unwrap_or(town_longitude),
        country_code: event.codepays.clone(),
        country_name: event.nompays.clone(),
        category,
        sub_category: event.event_type.clone(),
        is_covered_place: event.couvert,
        has_car_park: event.parking,
        has_parquet_floor: event.parquet,
        booking_url: event.url_reservation.clone(),
        image_url: event.url_affiche.clone(),
        thumbnail_url: if event.url_affiche.is_empty() {
            String::new()
        } else {
            format!("{THUMBNAIL_BASE}/{}_300.png", event.id)
        },
        is_partner: event.avantage.is_some(),
        partner_advantage: event.avantage.clone().unwrap_or_default(),
    })
}

/// A venue coordinate counts as present only when it parses to a nonzero
/// value; otherwise the event falls back to the town coordinate.
fn parse_coordinate(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value != 0.0 => Some(value),
        _ => None,
    }
}

fn join_address(line1: &str, line2: &str) -> String {
    if line2.is_empty() {
        line1.to_string()
    } else {
        format!("{line1}\n{line2}")
    }
}
