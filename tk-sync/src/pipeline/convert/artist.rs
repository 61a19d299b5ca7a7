use crate::apis::types::TkArtist;
use crate::util::hash::hash_string;
use tk_core::domain::Artist;
use tk_core::{Result, SyncError};

/// Source id value meaning "no real identifier assigned".
const SENTINEL_ID: &str = "-1";

const ARTIST_MEDIA_BASE: &str =
    "https://www.tamm-kreiz.bzh/vuhez/media/artistes/photos_retaillees";

/// Numeric identity for a source artist: the parsed source id, or a
/// name-derived hash when the source only carries the sentinel.
pub fn normalized_artist_id(artist: &TkArtist) -> Result<i64> {
    if artist.id == SENTINEL_ID {
        Ok(i64::from(hash_string(&artist.lenom)))
    } else {
        artist
            .id
            .parse()
            .map_err(|_| SyncError::MalformedField(format!("artist id: {:?}", artist.id)))
    }
}

pub fn convert_artist(artist: &TkArtist) -> Result<Artist> {
    Ok(Artist {
        id: normalized_artist_id(artist)?,
        name: artist.lenom.clone(),
        website: artist.site.clone().unwrap_or_default(),
        soundcloud: artist.soundcloud.clone().unwrap_or_default(),
        facebook: artist.facebook.clone().unwrap_or_default(),
        // Hashed identities have no media on the source side.
        image_url: if artist.id == SENTINEL_ID {
            String::new()
        } else {
            format!("{ARTIST_MEDIA_BASE}/{}_300.png", artist.id)
        },
        members: artist
            .membres
            .as_ref()
            .map(|members| members.iter().map(|member| member.nom.clone()).collect()),
    })
}
