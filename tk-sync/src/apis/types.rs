use serde::{Deserialize, Deserializer};

/// Short-form event stub returned by the index endpoint. Used only for
/// staleness detection, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct TkShortEvent {
    pub eve_id: String,
    pub eve_datemaj: String,
    pub eve_date: String,
}

#[derive(Debug, Deserialize)]
pub struct TkEventIndex {
    pub evenements: Vec<TkShortEvent>,
}

/// Full-form event fetched per id. Ephemeral: converted and discarded
/// within one sync run.
#[derive(Debug, Clone, Deserialize)]
pub struct TkFullEvent {
    pub id: String,
    pub datemaj: String,
    pub date: String,
    #[serde(default)]
    pub heure: String,
    /// Numeric subcategory code (1=Fest-Noz/Deiz, 3=Concert, ...).
    #[serde(default)]
    pub dpr_id: String,
    /// Human-readable category label.
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub libelle: String,
    #[serde(default)]
    pub ville: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub departement: String,
    #[serde(default)]
    pub codepays: String,
    #[serde(default)]
    pub nompays: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub adresse1: String,
    #[serde(default)]
    pub adresse2: String,
    #[serde(default)]
    pub infos: String,
    #[serde(default)]
    pub place_latitude: String,
    #[serde(default)]
    pub place_longitude: String,
    #[serde(default)]
    pub couvert: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub parquet: bool,
    #[serde(default)]
    pub prix_fr: String,
    #[serde(default)]
    pub url_reservation: String,
    #[serde(default)]
    pub url_affiche: String,
    /// Present (possibly empty) only for partner events.
    pub avantage: Option<String>,
    #[serde(default)]
    pub artistes: Vec<TkArtist>,
    #[serde(default)]
    pub organisateurs: Vec<TkOrganizer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TkArtist {
    /// "-1" marks an artist with no real identifier; the API emits it as a
    /// string or a bare number depending on the record.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub lenom: String,
    pub site: Option<String>,
    pub soundcloud: Option<String>,
    pub facebook: Option<String>,
    pub membres: Option<Vec<TkMember>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TkMember {
    #[serde(default)]
    pub id: String,
    pub nom: String,
    #[serde(default)]
    pub depuis: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TkOrganizer {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub libelle: String,
    pub site: Option<String>,
    pub telephone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    /// Contact visibility flags; "0" hides the corresponding field.
    pub afftelephone: Option<String>,
    pub affmobile: Option<String>,
    pub affemail: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_id_accepts_string_or_number() {
        let from_string: TkArtist =
            serde_json::from_str(r#"{"id": "42", "lenom": "Startijenn"}"#).unwrap();
        assert_eq!(from_string.id, "42");

        let from_number: TkArtist =
            serde_json::from_str(r#"{"id": -1, "lenom": "Fest Noz Band"}"#).unwrap();
        assert_eq!(from_number.id, "-1");
    }

    #[test]
    fn full_event_defaults_optional_fields() {
        let event: TkFullEvent = serde_json::from_str(
            r#"{"id": "1", "datemaj": "2024-01-02 10:00:00", "date": "2024-02-03"}"#,
        )
        .unwrap();
        assert!(!event.couvert);
        assert!(event.avantage.is_none());
        assert!(event.artistes.is_empty());
        assert_eq!(event.heure, "");
    }
}
