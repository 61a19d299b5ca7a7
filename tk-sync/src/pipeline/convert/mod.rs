pub mod artist;
pub mod event;
pub mod organizer;

pub use artist::{convert_artist, normalized_artist_id};
pub use event::convert_event;
pub use organizer::convert_organizer;
