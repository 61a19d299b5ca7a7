use crate::apis::types::TkOrganizer;
use tk_core::domain::Organizer;
use tk_core::{Result, SyncError};

const ORGANIZER_MEDIA_BASE: &str =
    "https://www.tamm-kreiz.bzh/vuhez/media/organisateurs/photos_retaillees";

pub fn convert_organizer(organizer: &TkOrganizer) -> Result<Organizer> {
    let id: i64 = organizer
        .id
        .parse()
        .map_err(|_| SyncError::MalformedField(format!("organizer id: {:?}", organizer.id)))?;

    Ok(Organizer {
        id,
        name: organizer.libelle.clone(),
        website: organizer.site.clone().unwrap_or_default(),
        phone_1: gated(&organizer.telephone, &organizer.afftelephone),
        phone_2: gated(&organizer.mobile, &organizer.affmobile),
        email: gated(&organizer.email, &organizer.affemail),
        image_url: format!("{ORGANIZER_MEDIA_BASE}/{}_300.png", organizer.id),
    })
}

/// Contact fields are published unless their visibility flag is the
/// explicit opt-out value "0"; an absent flag means visible.
fn gated(value: &Option<String>, flag: &Option<String>) -> String {
    if flag.as_deref() == Some("0") {
        String::new()
    } else {
        value.clone().unwrap_or_default()
    }
}
