// spotify/mod.rs - top-level spotify module re-exporting submodules
pub mod auth;
pub mod playlist;
pub mod types;

pub use auth::{fetch_access_token, resolve_credentials};
pub use playlist::{fetch_playlist_tracks, find_playlist_id};
pub use types::{SpotifyError, TrackMetadata};
